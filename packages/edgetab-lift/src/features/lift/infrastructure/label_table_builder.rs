//! Label table construction
//!
//! One pass over a label source builds the key → value table. When the label
//! source is the input itself, the non-label rows (and, if kept, the label
//! rows) are retained so they can be replayed as output rows.

use ahash::AHashSet;
use edgetab_io::{Row, RowSource};
use tracing::{debug, info};

use crate::config::LiftConfig;
use crate::errors::Result;
use crate::features::lift::domain::{DuplicatePolicy, LabelRoles, LabelTable, RowSelection};

/// Builds a `LabelTable` from one pass over a row source
#[derive(Debug, Clone, Copy)]
pub struct LabelTableBuilder<'a> {
    config: &'a LiftConfig,
    roles: LabelRoles,
}

impl<'a> LabelTableBuilder<'a> {
    pub fn new(config: &'a LiftConfig, roles: LabelRoles) -> Self {
        Self { config, roles }
    }

    /// Label-defining row under the resolved roles
    pub fn is_label_row(&self, row: &[String]) -> bool {
        self.roles
            .select_column
            .map_or(true, |idx| row[idx] == self.config.label_select_value)
    }

    /// Scan `source` to exhaustion.
    ///
    /// With `retain_rows`, non-label rows are kept, and label rows too unless
    /// `remove_label_records` is set. With `needed`, new keys outside the set
    /// are not stored.
    pub fn build<S: RowSource + ?Sized>(
        &self,
        source: &mut S,
        retain_rows: bool,
        needed: Option<&AHashSet<String>>,
    ) -> Result<(LabelTable, Vec<Row>)> {
        let mut labels = LabelTable::new(DuplicatePolicy::from_config(self.config));
        let mut retained = Vec::new();
        let mut label_rows = 0usize;

        if needed.is_some() {
            debug!("filtering for needed labels");
        }

        while let Some(row) = source.next_row()? {
            if self.is_label_row(&row) {
                label_rows += 1;
                labels.add(
                    &row[self.roles.match_column],
                    &row[self.roles.value_column],
                    needed,
                );
                if retain_rows && !self.config.remove_label_records {
                    retained.push(row);
                }
            } else if retain_rows {
                retained.push(row);
            }
        }

        info!(
            label_rows,
            labels = labels.len(),
            retained = retained.len(),
            "loaded labels"
        );
        Ok((labels, retained))
    }
}

/// Every lift-column value of the rows that may receive a lift
pub fn collect_needed_keys(
    rows: &[Row],
    selection: &RowSelection,
    lift_columns: &[usize],
) -> AHashSet<String> {
    let mut needed = AHashSet::new();
    for row in rows.iter().filter(|row| selection.is_input_selected(row)) {
        for &idx in lift_columns {
            if !needed.contains(row[idx].as_str()) {
                needed.insert(row[idx].clone());
            }
        }
    }
    info!(needed = needed.len(), "labels needed");
    needed
}
