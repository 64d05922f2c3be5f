use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use csv::QuoteStyle;

use super::{FIELD_SEPARATOR, STDIO_PATH};
use crate::domain::RowSink;
use crate::{Result, TableError};

/// TSV row sink with a fixed column schema.
///
/// The header line is written on construction. Buffered output is flushed by
/// `finish()`; dropping the writer releases the handle either way.
pub struct TsvWriter<W: Write = Box<dyn Write>> {
    writer: csv::Writer<W>,
    column_names: Vec<String>,
    rows_written: usize,
}

impl TsvWriter {
    /// Create a file, or use stdout for `-`
    pub fn create(column_names: Vec<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let writer: Box<dyn Write> = if path == Path::new(STDIO_PATH) {
            Box::new(BufWriter::new(io::stdout()))
        } else {
            let file = File::create(path).map_err(|err| {
                TableError::io(format!("cannot create {}: {}", path.display(), err))
                    .with_source(err)
            })?;
            Box::new(BufWriter::new(file))
        };
        Self::from_writer(column_names, writer)
    }
}

impl<W: Write> TsvWriter<W> {
    pub fn from_writer(column_names: Vec<String>, writer: W) -> Result<Self> {
        if column_names.is_empty() {
            return Err(TableError::schema("output has no columns"));
        }
        let mut writer = csv::WriterBuilder::new()
            .delimiter(FIELD_SEPARATOR)
            .quote_style(QuoteStyle::Never)
            .flexible(true)
            .from_writer(writer);
        writer.write_record(&column_names)?;
        Ok(Self {
            writer,
            column_names,
            rows_written: 0,
        })
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| TableError::from(err.into_error()))
    }
}

impl<W: Write> RowSink for TsvWriter<W> {
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
        self.writer.write_record(row)?;
        self.rows_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
