//! Lift run builder
//!
//! Runs `LiftProcessor` over in-memory tables and captures the output.

use edgetab_io::{MemorySink, MemoryTable, Row, RowSink, RowSource};
use edgetab_lift::{LiftConfig, LiftProcessor, LiftStats, Result};

/// Captured output of one run
#[derive(Debug)]
pub struct LiftOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub stats: LiftStats,
}

impl LiftOutput {
    /// Values of one output column, top to bottom
    pub fn column(&self, name: &str) -> Vec<&str> {
        let idx = self
            .columns
            .iter()
            .position(|c| c == name)
            .unwrap_or_else(|| panic!("no output column {name}, have {:?}", self.columns));
        self.rows.iter().map(|row| row[idx].as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// Builder for a lift run
#[derive(Debug)]
pub struct LiftRunBuilder {
    config: LiftConfig,
    input: MemoryTable,
    labels: Option<MemoryTable>,
}

impl LiftRunBuilder {
    pub fn new(input: MemoryTable) -> Self {
        Self {
            config: LiftConfig::default(),
            input,
            labels: None,
        }
    }

    pub fn with_config(mut self, config: LiftConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_labels(mut self, labels: MemoryTable) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn run(self) -> Result<LiftOutput> {
        let Self {
            config,
            mut input,
            mut labels,
        } = self;

        let mut slot: Option<MemorySink> = None;
        let slot_ref = &mut slot;
        let stats = LiftProcessor::new(&config)?.process(
            &mut input,
            labels.as_mut().map(|l| l as &mut dyn RowSource),
            move |columns| {
                let slot_ref = slot_ref;
                Ok(slot_ref.insert(MemorySink::new(columns)))
            },
        )?;

        let sink = slot.expect("sink opened on success");
        Ok(LiftOutput {
            columns: sink.column_names().to_vec(),
            rows: sink.into_rows(),
            stats,
        })
    }
}

/// Row literal helper
pub fn row(fields: &[&str]) -> Row {
    fields.iter().map(|f| f.to_string()).collect()
}
