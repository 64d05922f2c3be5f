//! Label lifting
//!
//! Copies the label of a referenced node into a new column next to the
//! reference. Labels come from label-defining rows, either of a separate
//! label source or of the input itself.
//!
//! ```text
//! input                      labels                     output
//! node1 label node2          node1 label node2          node1 label node2 node1;label node2;label
//! Q1    P31   Q5             Q1    label 'dog'@en       Q1    P31   Q5    'dog'@en    'human'@en
//!                            Q5    label 'human'@en
//! ```
//!
//! ## Layers
//!
//! - `domain`: label table, duplicate policy, row selection, output schema
//! - `infrastructure`: column resolution, table building, row rewriting
//! - `application`: `LiftProcessor` (in-memory and merge joins)

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::LiftProcessor;
pub use domain::{DuplicatePolicy, LabelTable, LiftMode, LiftStats, OutputSchema};
pub use infrastructure::ColumnResolver;
