//! Lift domain models

use ahash::{AHashMap, AHashSet};

use super::value_list::{concat_values, merge_values};
use crate::config::LiftConfig;

// ═══════════════════════════════════════════════════════════════════════════
// Duplicate policy
// ═══════════════════════════════════════════════════════════════════════════

/// How a second label value for an already-known key is combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Sorted union of list elements
    Merge,
    /// Ordered `|` concatenation
    Concatenate,
}

impl DuplicatePolicy {
    pub fn from_config(config: &LiftConfig) -> Self {
        if config.suppress_duplicate_labels {
            DuplicatePolicy::Merge
        } else {
            DuplicatePolicy::Concatenate
        }
    }

    pub fn combine(self, existing: &str, incoming: &str) -> String {
        match self {
            DuplicatePolicy::Merge => merge_values(existing, incoming),
            DuplicatePolicy::Concatenate => concat_values(existing, incoming),
        }
    }

    /// Fold `incoming` into a running accumulator; empty values are ignored.
    pub fn accumulate(self, acc: &mut String, incoming: &str) {
        if incoming.is_empty() {
            return;
        }
        if acc.is_empty() {
            acc.push_str(incoming);
        } else {
            *acc = self.combine(acc, incoming);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Label table
// ═══════════════════════════════════════════════════════════════════════════

/// Key → label value. Never holds an empty value.
#[derive(Debug, Clone)]
pub struct LabelTable {
    labels: AHashMap<String, String>,
    policy: DuplicatePolicy,
}

impl LabelTable {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            labels: AHashMap::new(),
            policy,
        }
    }

    /// Record one label-defining row.
    ///
    /// Empty values are dropped. A new key is only stored when it is in
    /// `needed` (if given); an existing key is always combined.
    pub fn add(&mut self, key: &str, value: &str, needed: Option<&AHashSet<String>>) {
        if value.is_empty() {
            return;
        }
        if let Some(existing) = self.labels.get_mut(key) {
            *existing = self.policy.combine(existing, value);
            return;
        }
        if needed.map_or(true, |keys| keys.contains(key)) {
            self.labels.insert(key.to_string(), value.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.labels.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Resolved column roles
// ═══════════════════════════════════════════════════════════════════════════

/// Columns of a label source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRoles {
    pub match_column: usize,
    /// `None`: every row is a label-defining row
    pub select_column: Option<usize>,
    pub value_column: usize,
}

/// Row-level selection rules shared by the label builder, the empty-column
/// filter and the row rewriter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    /// (column, value) marking label-defining rows inside the rows being lifted
    pub label_select: Option<(usize, String)>,
    /// (column, value) restricting which rows receive lifted values
    pub input_select: Option<(usize, String)>,
}

impl RowSelection {
    pub fn new(
        config: &LiftConfig,
        label_select_column: Option<usize>,
        input_select_column: Option<usize>,
    ) -> Self {
        Self {
            label_select: label_select_column.map(|idx| (idx, config.label_select_value.clone())),
            input_select: match (input_select_column, &config.input_select_value) {
                (Some(idx), Some(value)) => Some((idx, value.clone())),
                _ => None,
            },
        }
    }

    /// Row is a label-defining row carried along with the data rows
    pub fn is_label_row(&self, row: &[String]) -> bool {
        self.label_select
            .as_ref()
            .map_or(false, |(idx, value)| row[*idx] == *value)
    }

    /// Row passes the input selector (always true without one)
    pub fn is_input_selected(&self, row: &[String]) -> bool {
        self.input_select
            .as_ref()
            .map_or(true, |(idx, value)| row[*idx] == *value)
    }

    /// Row may receive lifted values
    pub fn is_liftable(&self, row: &[String]) -> bool {
        !self.is_label_row(row) && self.is_input_selected(row)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Output schema
// ═══════════════════════════════════════════════════════════════════════════

/// One lift: key column in the input → target column in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiftedColumn {
    pub input_column: usize,
    pub output_column: usize,
}

/// Output columns, fixed before the first row is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchema {
    pub column_names: Vec<String>,
    pub lifted: Vec<LiftedColumn>,
    /// Columns appended after the input columns
    pub new_columns: usize,
}

impl OutputSchema {
    pub fn width(&self) -> usize {
        self.column_names.len()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Run results
// ═══════════════════════════════════════════════════════════════════════════

/// Join strategy used for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiftMode {
    /// Hash join against a fully built label table
    InMemory,
    /// Streaming sort-merge join over two presorted sources
    Merge,
}

impl LiftMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LiftMode::InMemory => "in_memory",
            LiftMode::Merge => "merge",
        }
    }
}

/// Counters reported by a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiftStats {
    pub mode: LiftMode,
    pub input_rows: usize,
    pub rows_written: usize,
    /// Rows that received at least one lifted value
    pub rows_lifted: usize,
    /// Distinct keys with a label (table size, or keys matched in merge mode)
    pub labels_found: usize,
    pub output_columns: usize,
}

impl LiftStats {
    pub fn new(mode: LiftMode) -> Self {
        Self {
            mode,
            input_rows: 0,
            rows_written: 0,
            rows_lifted: 0,
            labels_found: 0,
            output_columns: 0,
        }
    }
}
