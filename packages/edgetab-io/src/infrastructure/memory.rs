//! In-memory row sources and sinks

use std::collections::VecDeque;

use crate::domain::{Row, RowSink, RowSource, TableHeader};
use crate::{Result, TableError};

/// A fully materialized table that can be consumed as a `RowSource`
#[derive(Debug, Clone)]
pub struct MemoryTable {
    header: TableHeader,
    rows: VecDeque<Row>,
}

impl MemoryTable {
    /// Build a table, padding short rows and rejecting wide ones
    pub fn new(header: TableHeader, rows: Vec<Row>) -> Result<Self> {
        let width = header.len();
        let mut checked = VecDeque::with_capacity(rows.len());
        for (idx, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(TableError::malformed_row(
                    idx + 1,
                    format!("expected {} fields, found {}", width, row.len()),
                ));
            }
            row.resize(width, String::new());
            checked.push_back(row);
        }
        Ok(Self {
            header,
            rows: checked,
        })
    }

    /// Literal constructor used by fixtures
    pub fn from_rows(columns: &[&str], rows: &[&[&str]]) -> Result<Self> {
        let header = TableHeader::from_names(columns.iter().copied())?;
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|field| field.to_string()).collect())
            .collect();
        Self::new(header, rows)
    }

    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl RowSource for MemoryTable {
    fn header(&self) -> &TableHeader {
        &self.header
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.pop_front())
    }
}

/// Collects written rows; enforces the same width contract as `TsvWriter`
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    column_names: Vec<String>,
    rows: Vec<Row>,
    finished: bool,
}

impl MemorySink {
    pub fn new(column_names: Vec<String>) -> Self {
        Self {
            column_names,
            rows: Vec::new(),
            finished: false,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl RowSink for MemorySink {
    fn column_names(&self) -> &[String] {
        &self.column_names
    }

    fn write_row(&mut self, row: &[String]) -> Result<()> {
        if row.len() != self.column_names.len() {
            return Err(TableError::schema(format!(
                "row width {} does not match {} output columns",
                row.len(),
                self.column_names.len()
            )));
        }
        self.rows.push(row.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
