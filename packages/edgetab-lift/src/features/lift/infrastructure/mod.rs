//! Lift infrastructure
//!
//! - `column_resolver`: column roles from names, aliases and file shape
//! - `label_table_builder`: one-pass label table build, needed-key prefilter
//! - `empty_column_filter`: drops lift columns that would stay blank
//! - `output_schema`: output column names and lift targets
//! - `row_rewriter`: per-row write/lift decisions

pub mod column_resolver;
pub mod empty_column_filter;
pub mod label_table_builder;
pub mod output_schema;
pub mod row_rewriter;

pub use column_resolver::ColumnResolver;
pub use empty_column_filter::{non_empty_lift_columns, report_unlifted};
pub use label_table_builder::{collect_needed_keys, LabelTableBuilder};
pub use output_schema::build_output_schema;
pub use row_rewriter::{RewrittenRow, RowRewriter};
