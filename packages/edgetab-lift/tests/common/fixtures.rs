//! Test fixtures
//!
//! Small edge and node tables, in memory or written to temporary TSV files.

use std::fs;
use std::path::PathBuf;

use edgetab_io::MemoryTable;
use tempfile::TempDir;

pub const EDGE_COLUMNS: &[&str] = &["node1", "label", "node2", "id"];

/// Edge table with the standard four columns
pub fn edge_table(rows: &[&[&str]]) -> MemoryTable {
    MemoryTable::from_rows(EDGE_COLUMNS, rows).unwrap()
}

/// Node table keyed by `id`
pub fn node_table(rows: &[&[&str]]) -> MemoryTable {
    MemoryTable::from_rows(&["id", "label"], rows).unwrap()
}

/// Edges referencing Q1, Q5 and Q42, with the labels of Q1 and Q5 inline
pub fn mixed_edges() -> MemoryTable {
    edge_table(&[
        &["Q1", "label", "'dog'@en", "e1"],
        &["Q5", "label", "'mammal'@en", "e2"],
        &["Q1", "P31", "Q5", "e3"],
        &["Q42", "P31", "Q5", "e4"],
    ])
}

pub const INPUT_TSV: &str = "\
node1\tlabel\tnode2\tid
Q1\tP31\tQ5\te1
Q2\tP31\tQ5\te2
Q2\tP279\tQ9\te3
";

pub const LABELS_TSV: &str = "\
node1\tlabel\tnode2\tid
Q1\tlabel\t'dog'@en\tl1
Q2\tlabel\t'cat'@en\tl2
Q2\tlabel\t'feline'@en\tl3
Q5\tlabel\t'mammal'@en\tl4
";

/// Temporary directory holding named files
pub struct TsvFiles {
    dir: TempDir,
}

impl TsvFiles {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).unwrap()
    }
}
