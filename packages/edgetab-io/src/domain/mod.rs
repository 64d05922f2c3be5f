//! Domain layer for edge tables
//!
//! # Domain Models
//!
//! - `Row`: one record, an ordered list of string fields
//! - `TableHeader`: column names, exact-name lookup and canonical column roles
//! - `FileShape`: edge file, node file, or anything else
//!
//! # Port Traits
//!
//! - `RowSource`: sequential, pull-based row reader
//! - `RowSink`: writer bound to a fixed output column schema
//!
//! # Examples
//!
//! ```rust
//! use edgetab_io::domain::{CanonicalColumn, FileShape, TableHeader};
//!
//! let header = TableHeader::from_names(["from", "predicate", "to", "id"]).unwrap();
//! assert_eq!(header.shape(), FileShape::Edge);
//! assert_eq!(header.canonical_index(CanonicalColumn::Node1), Some(0));
//! assert_eq!(header.column_index("id"), Some(3));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Result, TableError};

/// One record: ordered string fields, width equal to the header width.
pub type Row = Vec<String>;

// ═══════════════════════════════════════════════════════════════════════════
// Canonical columns
// ═══════════════════════════════════════════════════════════════════════════

/// Columns with a conventional meaning in edge and node files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalColumn {
    Node1,
    Label,
    Node2,
    Id,
}

/// Canonical name → accepted header spellings. The canonical name comes first.
const COLUMN_ALIASES: &[(CanonicalColumn, &[&str])] = &[
    (CanonicalColumn::Node1, &["node1", "from", "subject"]),
    (
        CanonicalColumn::Label,
        &["label", "predicate", "relation", "relationship"],
    ),
    (CanonicalColumn::Node2, &["node2", "to", "object"]),
    (CanonicalColumn::Id, &["id", "ID"]),
];

impl CanonicalColumn {
    pub const ALL: [CanonicalColumn; 4] = [
        CanonicalColumn::Node1,
        CanonicalColumn::Label,
        CanonicalColumn::Node2,
        CanonicalColumn::Id,
    ];

    /// Accepted header spellings, canonical spelling first
    pub fn aliases(self) -> &'static [&'static str] {
        COLUMN_ALIASES
            .iter()
            .find(|(column, _)| *column == self)
            .map(|(_, names)| *names)
            .unwrap_or(&[])
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalColumn::Node1 => "node1",
            CanonicalColumn::Label => "label",
            CanonicalColumn::Node2 => "node2",
            CanonicalColumn::Id => "id",
        }
    }
}

/// Semantic shape of a table, derived from its header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileShape {
    /// Has node1 and node2 columns (label may be missing)
    Edge,
    /// Not an edge file, but keyed by an id column
    Node,
    Other,
}

// ═══════════════════════════════════════════════════════════════════════════
// Table header
// ═══════════════════════════════════════════════════════════════════════════

/// Column names of a table plus everything derived from them once at open time.
///
/// The header is read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    column_names: Vec<String>,
    column_map: HashMap<String, usize>,
    node1: Option<usize>,
    label: Option<usize>,
    node2: Option<usize>,
    id: Option<usize>,
    shape: FileShape,
}

impl TableHeader {
    /// Build a header from column names.
    ///
    /// Fails on an empty header, an empty column name, or a duplicate name.
    pub fn new(column_names: Vec<String>) -> Result<Self> {
        if column_names.is_empty() {
            return Err(TableError::header("header has no columns"));
        }

        let mut column_map = HashMap::with_capacity(column_names.len());
        for (idx, name) in column_names.iter().enumerate() {
            if name.is_empty() {
                return Err(TableError::header(format!(
                    "column {} has an empty name",
                    idx + 1
                )));
            }
            if column_map.insert(name.clone(), idx).is_some() {
                return Err(TableError::header(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }

        let find = |column: CanonicalColumn| -> Result<Option<usize>> {
            let mut found: Option<(usize, &str)> = None;
            for alias in column.aliases() {
                if let Some(&idx) = column_map.get(*alias) {
                    if let Some((_, other)) = found {
                        return Err(TableError::header(format!(
                            "ambiguous {} column: both '{}' and '{}' are present",
                            column.as_str(),
                            other,
                            alias
                        )));
                    }
                    found = Some((idx, alias));
                }
            }
            Ok(found.map(|(idx, _)| idx))
        };

        let node1 = find(CanonicalColumn::Node1)?;
        let label = find(CanonicalColumn::Label)?;
        let node2 = find(CanonicalColumn::Node2)?;
        let id = find(CanonicalColumn::Id)?;

        let shape = if node1.is_some() && node2.is_some() {
            FileShape::Edge
        } else if id.is_some() {
            FileShape::Node
        } else {
            FileShape::Other
        };

        Ok(Self {
            column_names,
            column_map,
            node1,
            label,
            node2,
            id,
            shape,
        })
    }

    /// Convenience constructor for literal column lists
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Into::into).collect())
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn len(&self) -> usize {
        self.column_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.column_names.is_empty()
    }

    /// Exact-name lookup (no alias folding)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_map.get(name).copied()
    }

    /// Alias-aware lookup of a conventional column
    pub fn canonical_index(&self, column: CanonicalColumn) -> Option<usize> {
        match column {
            CanonicalColumn::Node1 => self.node1,
            CanonicalColumn::Label => self.label,
            CanonicalColumn::Node2 => self.node2,
            CanonicalColumn::Id => self.id,
        }
    }

    pub fn shape(&self) -> FileShape {
        self.shape
    }

    /// Column name at `idx`, or `"?"` when out of range (for diagnostics)
    pub fn name_of(&self, idx: usize) -> &str {
        self.column_names.get(idx).map(String::as_str).unwrap_or("?")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Port Traits
// ═══════════════════════════════════════════════════════════════════════════

/// Sequential row reader.
///
/// Every returned row has exactly `header().len()` fields.
pub trait RowSource {
    fn header(&self) -> &TableHeader;

    /// Next row, or `None` at end of input
    fn next_row(&mut self) -> Result<Option<Row>>;

    /// Drain the remaining rows into memory
    fn read_all(&mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row()? {
            rows.push(row);
        }
        Ok(rows)
    }
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    fn header(&self) -> &TableHeader {
        (**self).header()
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        (**self).next_row()
    }
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn header(&self) -> &TableHeader {
        (**self).header()
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        (**self).next_row()
    }
}

/// Row writer bound to a fixed column schema.
///
/// Implementations reject rows whose width differs from `column_names().len()`.
pub trait RowSink {
    fn column_names(&self) -> &[String];

    fn write_row(&mut self, row: &[String]) -> Result<()>;

    /// Flush buffered output
    fn finish(&mut self) -> Result<()>;
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
    fn column_names(&self) -> &[String] {
        (**self).column_names()
    }

    fn write_row(&mut self, row: &[String]) -> Result<()> {
        (**self).write_row(row)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<S: RowSink + ?Sized> RowSink for Box<S> {
    fn column_names(&self) -> &[String] {
        (**self).column_names()
    }

    fn write_row(&mut self, row: &[String]) -> Result<()> {
        (**self).write_row(row)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}
