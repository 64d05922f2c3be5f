//! edgetab-lift - Label lifting for tabular edge files
//!
//! Replaces node identifiers in selected columns with their human-readable
//! labels, written into new (or existing) columns. Two join strategies:
//!
//! - in-memory hash join (default)
//! - sort-merge join for presorted input and label files
//!
//! ## Usage
//!
//! ```rust,ignore
//! use edgetab_io::{TsvReader, TsvWriter};
//! use edgetab_lift::{LiftConfig, LiftProcessor};
//!
//! let config = LiftConfig::default().columns_to_lift(["node1"]);
//! let mut input = TsvReader::open("edges.tsv")?;
//! let mut labels = TsvReader::open("labels.tsv")?;
//! let stats = LiftProcessor::new(&config)?.process(
//!     &mut input,
//!     Some(&mut labels),
//!     |columns| TsvWriter::create(columns, "-"),
//! )?;
//! ```

pub mod config;
pub mod errors;
pub mod features;

pub use config::{ConfigError, LiftConfig, Validatable};
pub use errors::{LiftError, Result};
pub use features::lift::{LiftMode, LiftProcessor, LiftStats};
