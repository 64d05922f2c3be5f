//! Column role resolution
//!
//! Maps the configured (or conventional) column names onto indices of a
//! concrete source, switching on the source's `FileShape` for defaults.

use edgetab_io::{CanonicalColumn, FileShape, TableHeader};
use tracing::debug;

use crate::config::LiftConfig;
use crate::errors::{LiftError, Result};
use crate::features::lift::domain::LabelRoles;

const DEFAULT_LIFT_COLUMNS: [CanonicalColumn; 3] = [
    CanonicalColumn::Node1,
    CanonicalColumn::Label,
    CanonicalColumn::Node2,
];

/// Resolves column roles against one header at a time
#[derive(Debug, Clone, Copy)]
pub struct ColumnResolver<'a> {
    config: &'a LiftConfig,
}

impl<'a> ColumnResolver<'a> {
    pub fn new(config: &'a LiftConfig) -> Self {
        Self { config }
    }

    fn named(header: &TableHeader, name: &str, role: &str) -> Result<usize> {
        header
            .column_index(name)
            .ok_or_else(|| LiftError::config(format!("{} `{}` not found.", role, name)))
    }

    /// Columns whose values are lift keys, in lift order
    pub fn lift_columns(&self, header: &TableHeader) -> Result<Vec<usize>> {
        let columns: Vec<usize> = if self.config.columns_to_lift.is_empty() {
            DEFAULT_LIFT_COLUMNS
                .iter()
                .filter_map(|column| header.canonical_index(*column))
                .collect()
        } else {
            self.config
                .columns_to_lift
                .iter()
                .map(|name| Self::named(header, name, "Lift column"))
                .collect::<Result<_>>()?
        };

        if columns.is_empty() {
            return Err(LiftError::config("No lift columns found."));
        }
        Ok(columns)
    }

    /// Key column of a label source
    pub fn label_match_column(&self, header: &TableHeader) -> Result<usize> {
        if let Some(name) = &self.config.label_match_column {
            return Self::named(header, name, "Label match column");
        }

        match header.shape() {
            FileShape::Edge => {
                debug!("label source is an edge file, matching on node1");
                header.canonical_index(CanonicalColumn::Node1).ok_or_else(|| {
                    LiftError::config("Cannot find the label match column (node1) in the label edge file.")
                })
            }
            FileShape::Node => {
                debug!("label source is a node file, matching on id");
                header.canonical_index(CanonicalColumn::Id).ok_or_else(|| {
                    LiftError::config("Cannot find the label match column (id) in the label node file.")
                })
            }
            FileShape::Other => Err(LiftError::config(
                "No label match column specified and the label source is not an edge or node file.",
            )),
        }
    }

    /// Column marking label-defining rows; `None` means every row is one
    pub fn label_select_column(&self, header: &TableHeader) -> Result<Option<usize>> {
        if self.config.disable_label_select {
            return Ok(None);
        }
        if let Some(name) = &self.config.label_select_column {
            return Self::named(header, name, "Label select column").map(Some);
        }

        match header.shape() {
            FileShape::Edge => header
                .canonical_index(CanonicalColumn::Label)
                .map(Some)
                .ok_or_else(|| {
                    LiftError::config("Cannot find the label select column (label) in the label file.")
                }),
            FileShape::Node => {
                debug!("label source is a node file, no label select column");
                Ok(None)
            }
            FileShape::Other => Err(LiftError::config(
                "No label select column specified and the label source is not an edge or node file.",
            )),
        }
    }

    /// Column holding the label value
    pub fn label_value_column(&self, header: &TableHeader) -> Result<usize> {
        if let Some(name) = &self.config.label_value_column {
            return Self::named(header, name, "Label value column");
        }

        match header.shape() {
            FileShape::Edge => {
                debug!("label source is an edge file, taking values from node2");
                header.canonical_index(CanonicalColumn::Node2).ok_or_else(|| {
                    LiftError::config("Cannot find the label value column (node2) in the label edge file.")
                })
            }
            FileShape::Node => {
                debug!("label source is a node file, taking values from label");
                header.canonical_index(CanonicalColumn::Label).ok_or_else(|| {
                    LiftError::config("Cannot find the label value column (label) in the label node file.")
                })
            }
            FileShape::Other => Err(LiftError::config(
                "No label value column specified and the label source is not an edge or node file.",
            )),
        }
    }

    /// All three label-source roles
    pub fn label_roles(&self, header: &TableHeader) -> Result<LabelRoles> {
        let roles = LabelRoles {
            match_column: self.label_match_column(header)?,
            select_column: self.label_select_column(header)?,
            value_column: self.label_value_column(header)?,
        };
        debug!(
            match_column = header.name_of(roles.match_column),
            select_column = roles.select_column.map(|idx| header.name_of(idx)),
            value_column = header.name_of(roles.value_column),
            select_value = %self.config.label_select_value,
            "resolved label columns"
        );
        Ok(roles)
    }

    /// Input selector column; only resolved when a select or update value is set
    pub fn input_select_column(&self, header: &TableHeader) -> Result<Option<usize>> {
        if !self.config.uses_input_select() {
            return Ok(None);
        }
        match &self.config.input_select_column {
            Some(name) => Self::named(header, name, "Input select column").map(Some),
            None => header
                .canonical_index(CanonicalColumn::Label)
                .map(Some)
                .ok_or_else(|| LiftError::config("No input select column index.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> TableHeader {
        TableHeader::from_names(names.iter().copied()).unwrap()
    }

    #[test]
    fn test_default_lift_columns_only_existing_ones() {
        let config = LiftConfig::default();
        let resolver = ColumnResolver::new(&config);

        let full = header(&["node1", "label", "node2", "id"]);
        assert_eq!(resolver.lift_columns(&full).unwrap(), vec![0, 1, 2]);

        let no_label = header(&["id", "node1", "node2"]);
        assert_eq!(resolver.lift_columns(&no_label).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_explicit_lift_columns() {
        let config = LiftConfig::default().columns_to_lift(["node2", "node1"]);
        let resolver = ColumnResolver::new(&config);
        let h = header(&["node1", "label", "node2"]);
        assert_eq!(resolver.lift_columns(&h).unwrap(), vec![2, 0]);

        let config = LiftConfig::default().columns_to_lift(["nope"]);
        let err = ColumnResolver::new(&config).lift_columns(&h).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_no_lift_columns() {
        let config = LiftConfig::default();
        let err = ColumnResolver::new(&config)
            .lift_columns(&header(&["key", "value"]))
            .unwrap_err();
        assert!(err.to_string().contains("No lift columns found."));
    }

    #[test]
    fn test_label_roles_for_edge_file() {
        let config = LiftConfig::default();
        let roles = ColumnResolver::new(&config)
            .label_roles(&header(&["from", "predicate", "to"]))
            .unwrap();
        assert_eq!(
            roles,
            LabelRoles {
                match_column: 0,
                select_column: Some(1),
                value_column: 2,
            }
        );
    }

    #[test]
    fn test_label_roles_for_node_file() {
        let config = LiftConfig::default();
        let roles = ColumnResolver::new(&config)
            .label_roles(&header(&["id", "label", "alias"]))
            .unwrap();
        assert_eq!(roles.match_column, 0);
        assert_eq!(roles.select_column, None);
        assert_eq!(roles.value_column, 1);
    }

    #[test]
    fn test_label_roles_for_other_file_need_names() {
        let h = header(&["key", "kind", "text"]);

        let config = LiftConfig::default();
        assert!(ColumnResolver::new(&config).label_roles(&h).is_err());

        let config = LiftConfig::default()
            .label_match_column("key")
            .label_select_column("kind")
            .label_value_column("text");
        let roles = ColumnResolver::new(&config).label_roles(&h).unwrap();
        assert_eq!(roles.select_column, Some(1));
        assert_eq!(roles.value_column, 2);
    }

    #[test]
    fn test_disable_label_select() {
        let config = LiftConfig::default().disable_label_select(true);
        let selected = ColumnResolver::new(&config)
            .label_select_column(&header(&["node1", "label", "node2"]))
            .unwrap();
        assert_eq!(selected, None);
    }

    #[test]
    fn test_input_select_column_resolution() {
        let h = header(&["node1", "label", "node2", "kind"]);

        let config = LiftConfig::default();
        assert_eq!(ColumnResolver::new(&config).input_select_column(&h).unwrap(), None);

        let config = LiftConfig::default().input_select_value("P31");
        assert_eq!(
            ColumnResolver::new(&config).input_select_column(&h).unwrap(),
            Some(1)
        );

        let config = LiftConfig::default()
            .update_select_value("lifted")
            .input_select_column("kind");
        assert_eq!(
            ColumnResolver::new(&config).input_select_column(&h).unwrap(),
            Some(3)
        );

        let config = LiftConfig::default().input_select_value("P31");
        let err = ColumnResolver::new(&config)
            .input_select_column(&header(&["id", "name"]))
            .unwrap_err();
        assert!(err.is_config());
    }
}
