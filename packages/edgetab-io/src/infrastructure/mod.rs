//! Infrastructure layer - Row source and sink adapters
//!
//! - `tsv`: tab-separated files, stdin and stdout
//! - `memory`: in-memory tables and sinks

pub mod memory;
pub mod tsv;

pub use memory::{MemorySink, MemoryTable};
pub use tsv::{TsvReader, TsvWriter};
