//! Feature modules

pub mod lift;
