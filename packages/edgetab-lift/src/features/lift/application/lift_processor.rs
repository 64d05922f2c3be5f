//! Lift join driver
//!
//! Two strategies:
//!
//! - **in-memory**: build the whole label table, then stream (or replay) the
//!   input through the row rewriter. Input rows are buffered only when a
//!   prefilter pass, empty-column suppression, or self-referential labels
//!   need a second look at them.
//! - **merge**: both sources presorted on their keys, exactly one lift
//!   column; a sort-merge join with O(1) label state.

use edgetab_io::{CanonicalColumn, FileShape, Row, RowSink, RowSource, TableHeader};
use tracing::{debug, info, warn};

use crate::config::{LiftConfig, Validatable};
use crate::errors::{LiftError, Result};
use crate::features::lift::domain::{
    DuplicatePolicy, LabelTable, LiftMode, LiftStats, RowSelection,
};
use crate::features::lift::infrastructure::{
    build_output_schema, collect_needed_keys, non_empty_lift_columns, report_unlifted,
    ColumnResolver, LabelTableBuilder, RewrittenRow, RowRewriter,
};

/// Drives one lift run from row sources to a row sink
#[derive(Debug, Clone, Copy)]
pub struct LiftProcessor<'a> {
    config: &'a LiftConfig,
}

impl<'a> LiftProcessor<'a> {
    /// Validates the configuration up front
    pub fn new(config: &'a LiftConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Strategy chosen for the given sources
    pub fn mode(&self, has_label_source: bool) -> LiftMode {
        if has_label_source && self.config.merge_requested() {
            LiftMode::Merge
        } else {
            LiftMode::InMemory
        }
    }

    /// Run the lift. `open_sink` receives the final output column names and
    /// is called only after every check that could fail without output.
    pub fn process<S, F>(
        &self,
        input: &mut dyn RowSource,
        labels: Option<&mut dyn RowSource>,
        open_sink: F,
    ) -> Result<LiftStats>
    where
        S: RowSink,
        F: FnOnce(Vec<String>) -> edgetab_io::Result<S>,
    {
        match labels {
            Some(labels) if self.config.merge_requested() => {
                self.process_as_merge(input, labels, open_sink)
            }
            labels => {
                if self.config.input_file_is_presorted && self.config.label_file_is_presorted {
                    warn!("presorted sources declared but merge preconditions are not met, using in-memory join");
                }
                self.process_in_memory(input, labels, open_sink)
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // In-memory (hash join)
    // ═══════════════════════════════════════════════════════════════════════

    pub fn process_in_memory<S, F>(
        &self,
        input: &mut dyn RowSource,
        label_source: Option<&mut dyn RowSource>,
        open_sink: F,
    ) -> Result<LiftStats>
    where
        S: RowSink,
        F: FnOnce(Vec<String>) -> edgetab_io::Result<S>,
    {
        info!("lifting with in-memory buffering");
        let config = self.config;
        let resolver = ColumnResolver::new(config);
        let header = input.header().clone();

        let lift_columns = resolver.lift_columns(&header)?;
        let input_select_column = resolver.input_select_column(&header)?;

        // Label rows only travel with the data rows when the labels come from
        // the input itself and are kept.
        let mut label_select_column = None;
        let mut buffered: Option<Vec<Row>> = None;

        let labels: LabelTable = match label_source {
            Some(label_source) => {
                let roles = resolver.label_roles(label_source.header())?;
                let needed = if config.prefilter_labels {
                    debug!("reading input data to prefilter the labels");
                    let rows = self.load_input(input, &header)?;
                    let selection = RowSelection::new(config, None, input_select_column);
                    let needed = collect_needed_keys(&rows, &selection, &lift_columns);
                    buffered = Some(rows);
                    Some(needed)
                } else {
                    None
                };
                let (labels, _) =
                    LabelTableBuilder::new(config, roles).build(label_source, false, needed.as_ref())?;
                labels
            }
            None => {
                debug!("loading labels and data rows from the input");
                let roles = resolver.label_roles(&header)?;
                let (labels, rows) = LabelTableBuilder::new(config, roles).build(input, true, None)?;
                buffered = Some(rows);
                if !config.remove_label_records {
                    label_select_column = roles.select_column;
                }
                labels
            }
        };

        if labels.is_empty() && !config.ok_if_no_labels {
            return Err(LiftError::data("No labels were found."));
        }

        let selection = RowSelection::new(config, label_select_column, input_select_column);

        let slots: Vec<usize> = if config.suppress_empty_columns {
            if buffered.is_none() {
                debug!("reading input data to suppress empty columns");
                buffered = Some(self.load_input(input, &header)?);
            }
            let rows = buffered.as_deref().unwrap_or_default();
            let slots = non_empty_lift_columns(&lift_columns, rows, &labels, &selection);
            report_unlifted(&header, &lift_columns, &slots);
            slots
        } else {
            (0..lift_columns.len()).collect()
        };

        let schema = build_output_schema(&header, config, &lift_columns, &slots)?;
        let mut sink = open_sink(schema.column_names.clone())?;
        let rewriter = RowRewriter::new(
            &schema,
            &selection,
            config.remove_label_records,
            input_select_column,
            config.update_select_value.as_deref(),
        );

        let mut stats = LiftStats::new(LiftMode::InMemory);
        stats.labels_found = labels.len();
        stats.output_columns = schema.width();

        let lookup = |key: &str| labels.get(key);
        match buffered {
            Some(rows) => {
                for row in rows {
                    stats.input_rows += 1;
                    emit(&mut sink, &mut stats, rewriter.rewrite(&row, lookup))?;
                }
            }
            None => {
                while let Some(row) = input.next_row()? {
                    stats.input_rows += 1;
                    emit(&mut sink, &mut stats, rewriter.rewrite(&row, lookup))?;
                }
            }
        }

        sink.finish()?;
        log_stats(&stats);
        Ok(stats)
    }

    /// Buffer the input, dropping its label-defining rows when
    /// `remove_label_records` is set and the input has a label selector.
    fn load_input(&self, input: &mut dyn RowSource, header: &TableHeader) -> Result<Vec<Row>> {
        let select_column = if self.config.remove_label_records {
            self.input_label_select_column(header)?
        } else {
            None
        };

        let Some(idx) = select_column else {
            debug!("loading input rows with label records");
            return Ok(input.read_all()?);
        };

        debug!("loading input rows without label records");
        let mut rows = Vec::new();
        while let Some(row) = input.next_row()? {
            if row[idx] != self.config.label_select_value {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    /// Label selector on the input side. Unlike a label source, an input
    /// without a conventional label column simply has no label rows.
    fn input_label_select_column(&self, header: &TableHeader) -> Result<Option<usize>> {
        if self.config.disable_label_select {
            return Ok(None);
        }
        if self.config.label_select_column.is_some() {
            return ColumnResolver::new(self.config).label_select_column(header);
        }
        Ok(match header.shape() {
            FileShape::Edge => header.canonical_index(CanonicalColumn::Label),
            FileShape::Node | FileShape::Other => None,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Merge (sort-merge join)
    // ═══════════════════════════════════════════════════════════════════════

    /// Both sources must be sorted ascending on their key columns; this is
    /// trusted, not checked.
    pub fn process_as_merge<S, F>(
        &self,
        input: &mut dyn RowSource,
        label_source: &mut dyn RowSource,
        open_sink: F,
    ) -> Result<LiftStats>
    where
        S: RowSink,
        F: FnOnce(Vec<String>) -> edgetab_io::Result<S>,
    {
        info!("merging sorted input and label files");
        let config = self.config;
        let resolver = ColumnResolver::new(config);
        let header = input.header().clone();

        let lift_columns = resolver.lift_columns(&header)?;
        if lift_columns.len() != 1 {
            return Err(LiftError::config(format!(
                "Merge mode expects exactly one lift column, got {}.",
                lift_columns.len()
            )));
        }
        let lift_column = lift_columns[0];

        let schema = build_output_schema(&header, config, &lift_columns, &[0])?;
        if schema.new_columns > 1 {
            return Err(LiftError::config(format!(
                "Merge mode expects zero or one new columns, got {}.",
                schema.new_columns
            )));
        }

        let roles = resolver.label_roles(label_source.header())?;
        let builder = LabelTableBuilder::new(config, roles);
        let input_select_column = resolver.input_select_column(&header)?;
        let selection = RowSelection::new(config, None, input_select_column);
        let policy = DuplicatePolicy::from_config(config);

        let mut sink = open_sink(schema.column_names.clone())?;
        let rewriter = RowRewriter::new(
            &schema,
            &selection,
            config.remove_label_records,
            input_select_column,
            config.update_select_value.as_deref(),
        );

        let mut stats = LiftStats::new(LiftMode::Merge);
        stats.output_columns = schema.width();

        // Carried across input rows that share a key.
        let mut cursor = label_source.next_row()?;
        let mut last_value_to_lift: Option<String> = None;
        let mut lifted_label_value = String::new();

        while let Some(row) = input.next_row()? {
            stats.input_rows += 1;

            if !selection.is_input_selected(&row) {
                emit(&mut sink, &mut stats, rewriter.rewrite(&row, |_| None))?;
                continue;
            }

            let value_to_lift = row[lift_column].as_str();
            if last_value_to_lift.as_deref() != Some(value_to_lift) {
                last_value_to_lift = Some(value_to_lift.to_string());
                lifted_label_value.clear();

                while let Some(label_row) = &cursor {
                    if label_row[roles.match_column].as_str() >= value_to_lift {
                        break;
                    }
                    cursor = label_source.next_row()?;
                }

                while let Some(label_row) = &cursor {
                    if label_row[roles.match_column] != value_to_lift {
                        break;
                    }
                    if builder.is_label_row(label_row) {
                        policy.accumulate(&mut lifted_label_value, &label_row[roles.value_column]);
                    }
                    cursor = label_source.next_row()?;
                }

                if !lifted_label_value.is_empty() {
                    stats.labels_found += 1;
                }
            }

            let current = lifted_label_value.as_str();
            let rewritten = rewriter.rewrite(&row, |_| (!current.is_empty()).then_some(current));
            emit(&mut sink, &mut stats, rewritten)?;
        }

        sink.finish()?;
        log_stats(&stats);
        Ok(stats)
    }
}

fn emit<S: RowSink>(
    sink: &mut S,
    stats: &mut LiftStats,
    rewritten: Option<RewrittenRow>,
) -> Result<()> {
    if let Some(out) = rewritten {
        sink.write_row(&out.fields)?;
        stats.rows_written += 1;
        if out.lifted {
            stats.rows_lifted += 1;
        }
    }
    Ok(())
}

fn log_stats(stats: &LiftStats) {
    info!(
        mode = stats.mode.as_str(),
        input_rows = stats.input_rows,
        rows_written = stats.rows_written,
        rows_lifted = stats.rows_lifted,
        labels_found = stats.labels_found,
        "lift finished"
    );
}
