//! Domain Models for lifting
//!
//! Pure data and policies, no I/O.

pub mod models;
pub mod value_list;

pub use models::{
    DuplicatePolicy, LabelRoles, LabelTable, LiftMode, LiftStats, LiftedColumn, OutputSchema,
    RowSelection,
};
pub use value_list::{concat_values, merge_values, split_list};

#[cfg(test)]
mod tests;
