//! Per-row output rewriting

use edgetab_io::Row;

use crate::features::lift::domain::{OutputSchema, RowSelection};

/// Output row produced from one input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenRow {
    pub fields: Row,
    /// At least one lift succeeded
    pub lifted: bool,
}

/// Rewrites input rows against a fixed output schema.
///
/// Decision order: label-defining rows are never lifted (and dropped when
/// `remove_label_rows`); rows failing the input selector pass through; all
/// other rows get every lookup hit written into its target column, plus the
/// selector rewrite when configured.
#[derive(Debug, Clone)]
pub struct RowRewriter<'a> {
    schema: &'a OutputSchema,
    selection: &'a RowSelection,
    remove_label_rows: bool,
    /// (input select column, value written on lifted rows)
    update_select: Option<(usize, &'a str)>,
}

impl<'a> RowRewriter<'a> {
    pub fn new(
        schema: &'a OutputSchema,
        selection: &'a RowSelection,
        remove_label_rows: bool,
        input_select_column: Option<usize>,
        update_select_value: Option<&'a str>,
    ) -> Self {
        Self {
            schema,
            selection,
            remove_label_rows,
            update_select: input_select_column.zip(update_select_value),
        }
    }

    /// `None` when the row is suppressed from the output.
    ///
    /// `lookup` maps a key to its label value, if any.
    pub fn rewrite<'v, F>(&self, row: &[String], lookup: F) -> Option<RewrittenRow>
    where
        F: Fn(&str) -> Option<&'v str>,
    {
        let mut fields = Vec::with_capacity(self.schema.width());
        fields.extend_from_slice(row);
        fields.resize(self.schema.width(), String::new());

        if self.selection.is_label_row(row) {
            if self.remove_label_rows {
                return None;
            }
            return Some(RewrittenRow {
                fields,
                lifted: false,
            });
        }

        if !self.selection.is_input_selected(row) {
            return Some(RewrittenRow {
                fields,
                lifted: false,
            });
        }

        let mut lifted = false;
        for column in &self.schema.lifted {
            if let Some(value) = lookup(&row[column.input_column]) {
                fields[column.output_column] = value.to_string();
                lifted = true;
            }
        }
        if lifted {
            if let Some((idx, value)) = self.update_select {
                fields[idx] = value.to_string();
            }
        }

        Some(RewrittenRow { fields, lifted })
    }
}
