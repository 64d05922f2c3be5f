//! edgetab-io - Row sources and sinks for tabular edge files
//!
//! Edge files are tab-separated tables whose columns follow the
//! `node1` / `label` / `node2` convention (edge files) or are keyed by an
//! `id` column (node files).
//!
//! ## Layers
//!
//! - `domain`: `TableHeader`, `FileShape`, `CanonicalColumn`, and the
//!   `RowSource` / `RowSink` ports
//! - `infrastructure`: TSV reader and writer (files, stdin, stdout) and
//!   in-memory adapters
//!
//! ## Usage
//!
//! ```rust,ignore
//! use edgetab_io::{RowSink, RowSource, TsvReader, TsvWriter};
//!
//! let mut input = TsvReader::open("edges.tsv")?;
//! let mut output = TsvWriter::create(input.header().column_names().to_vec(), "-")?;
//! while let Some(row) = input.next_row()? {
//!     output.write_row(&row)?;
//! }
//! output.finish()?;
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, TableError};

pub use domain::{CanonicalColumn, FileShape, Row, RowSink, RowSource, TableHeader};
pub use infrastructure::{MemorySink, MemoryTable, TsvReader, TsvWriter};
