//! Lift options
//!
//! Every option is resolved before the run starts; nothing changes mid-run.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;

/// Suffix appended to a lifted column's name to form its output column
pub const DEFAULT_LIFT_SUFFIX: &str = ";label";

/// Selector value that marks label-defining rows
pub const DEFAULT_LABEL_SELECT_VALUE: &str = "label";

/// Reserved separator between the elements of a multi-valued field
pub const LIST_SEPARATOR: &str = "|";

/// Lift configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LiftConfig {
    // ========================================
    // Input selection
    // ========================================
    /// Column deciding which input rows may receive lifted values
    /// (default: the input's label column)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_select_column: Option<String>,

    /// Only rows holding this value in the input select column are lifted into
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_select_value: Option<String>,

    /// Columns whose values are lift keys (default: node1, label, node2)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns_to_lift: Vec<String>,

    // ========================================
    // Output
    // ========================================
    /// Output column names for the lifted values, by position in the lift list
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns_to_write: Vec<String>,

    /// Suffix forming the default output column name
    pub lift_suffix: String,

    /// Written into the input select column of rows that received a lift
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_select_value: Option<String>,

    // ========================================
    // Label source
    // ========================================
    /// Column identifying label-defining rows (default: label for edge files,
    /// none for node files)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_select_column: Option<String>,

    /// Value identifying label-defining rows
    pub label_select_value: String,

    /// Treat every label source row as a label-defining row
    pub disable_label_select: bool,

    /// Key column of the label source (default: node1 or id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_match_column: Option<String>,

    /// Value column of the label source (default: node2 or label)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_value_column: Option<String>,

    // ========================================
    // Policies
    // ========================================
    /// Drop label-defining rows from the output
    pub remove_label_records: bool,

    /// Merge multi-valued labels as a sorted, de-duplicated list instead of
    /// plain concatenation
    pub suppress_duplicate_labels: bool,

    /// Drop lifted output columns that would stay blank in every row
    pub suppress_empty_columns: bool,

    /// Accept an empty label table
    pub ok_if_no_labels: bool,

    /// Read the input first and only keep labels it references
    pub prefilter_labels: bool,

    /// Input is sorted ascending on the lift column
    pub input_file_is_presorted: bool,

    /// Label file is sorted ascending on the match column
    pub label_file_is_presorted: bool,
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            input_select_column: None,
            input_select_value: None,
            columns_to_lift: Vec::new(),
            columns_to_write: Vec::new(),
            lift_suffix: DEFAULT_LIFT_SUFFIX.to_string(),
            update_select_value: None,
            label_select_column: None,
            label_select_value: DEFAULT_LABEL_SELECT_VALUE.to_string(),
            disable_label_select: false,
            label_match_column: None,
            label_value_column: None,
            remove_label_records: true,
            suppress_duplicate_labels: true,
            suppress_empty_columns: false,
            ok_if_no_labels: false,
            prefilter_labels: false,
            input_file_is_presorted: false,
            label_file_is_presorted: false,
        }
    }
}

// ============================================================================
// Builder-style setters
// ============================================================================

fn owned<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

impl LiftConfig {
    pub fn input_select_column(mut self, name: impl Into<String>) -> Self {
        self.input_select_column = Some(name.into());
        self
    }

    pub fn input_select_value(mut self, value: impl Into<String>) -> Self {
        self.input_select_value = Some(value.into());
        self
    }

    pub fn columns_to_lift<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns_to_lift = owned(names);
        self
    }

    pub fn columns_to_write<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns_to_write = owned(names);
        self
    }

    pub fn lift_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.lift_suffix = suffix.into();
        self
    }

    pub fn update_select_value(mut self, value: impl Into<String>) -> Self {
        self.update_select_value = Some(value.into());
        self
    }

    pub fn label_select_column(mut self, name: impl Into<String>) -> Self {
        self.label_select_column = Some(name.into());
        self
    }

    pub fn label_select_value(mut self, value: impl Into<String>) -> Self {
        self.label_select_value = value.into();
        self
    }

    pub fn disable_label_select(mut self, disable: bool) -> Self {
        self.disable_label_select = disable;
        self
    }

    pub fn label_match_column(mut self, name: impl Into<String>) -> Self {
        self.label_match_column = Some(name.into());
        self
    }

    pub fn label_value_column(mut self, name: impl Into<String>) -> Self {
        self.label_value_column = Some(name.into());
        self
    }

    pub fn remove_label_records(mut self, remove: bool) -> Self {
        self.remove_label_records = remove;
        self
    }

    pub fn suppress_duplicate_labels(mut self, suppress: bool) -> Self {
        self.suppress_duplicate_labels = suppress;
        self
    }

    pub fn suppress_empty_columns(mut self, suppress: bool) -> Self {
        self.suppress_empty_columns = suppress;
        self
    }

    pub fn ok_if_no_labels(mut self, ok: bool) -> Self {
        self.ok_if_no_labels = ok;
        self
    }

    pub fn prefilter_labels(mut self, prefilter: bool) -> Self {
        self.prefilter_labels = prefilter;
        self
    }

    pub fn input_file_is_presorted(mut self, presorted: bool) -> Self {
        self.input_file_is_presorted = presorted;
        self
    }

    pub fn label_file_is_presorted(mut self, presorted: bool) -> Self {
        self.label_file_is_presorted = presorted;
        self
    }

    /// Whether the input select column has to be resolved at all
    pub fn uses_input_select(&self) -> bool {
        self.input_select_value.is_some() || self.update_select_value.is_some()
    }

    /// Merge-join preconditions that depend on options alone. The driver
    /// additionally requires a separate label source.
    pub fn merge_requested(&self) -> bool {
        self.columns_to_lift.len() == 1
            && !self.suppress_empty_columns
            && self.input_file_is_presorted
            && self.label_file_is_presorted
    }
}

impl Validatable for LiftConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.lift_suffix.is_empty() {
            return Err(ConfigError::invalid(
                "lift_suffix",
                "must not be empty; lifted values would overwrite their key column",
            ));
        }

        if self.disable_label_select && self.label_select_column.is_some() {
            return Err(ConfigError::conflict(
                "label_select_column is set while disable_label_select is true",
                "drop one of the two options",
            ));
        }

        for (field, names) in [
            ("columns_to_lift", &self.columns_to_lift),
            ("columns_to_write", &self.columns_to_write),
        ] {
            if names.iter().any(String::is_empty) {
                return Err(ConfigError::invalid(field, "column names must not be empty"));
            }
        }

        if !self.columns_to_lift.is_empty()
            && self.columns_to_write.len() > self.columns_to_lift.len()
        {
            return Err(ConfigError::conflict(
                format!(
                    "{} columns_to_write for {} columns_to_lift",
                    self.columns_to_write.len(),
                    self.columns_to_lift.len()
                ),
                "give at most one output column per lifted column",
            ));
        }

        Ok(())
    }
}
