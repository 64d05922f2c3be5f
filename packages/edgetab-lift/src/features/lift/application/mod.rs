//! Lift application layer
//!
//! `LiftProcessor` picks a join strategy and drives sources through the
//! infrastructure components into a sink.

pub mod lift_processor;

pub use lift_processor::LiftProcessor;
