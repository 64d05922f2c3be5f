use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::StringRecord;

use super::{COMMENT_PREFIX, FIELD_SEPARATOR, STDIO_PATH};
use crate::domain::{Row, RowSource, TableHeader};
use crate::{Result, TableError};

/// Streaming TSV row source.
///
/// Short rows are padded with empty fields; rows wider than the header are
/// rejected with their line number.
pub struct TsvReader<R: Read = Box<dyn Read>> {
    reader: csv::Reader<R>,
    header: TableHeader,
    record: StringRecord,
    origin: String,
}

impl TsvReader {
    /// Open a file, or stdin for `-`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path == Path::new(STDIO_PATH) {
            let stdin: Box<dyn Read> = Box::new(io::stdin());
            return Self::with_origin(stdin, "<stdin>");
        }

        let file = File::open(path).map_err(|err| {
            TableError::io(format!("cannot open {}: {}", path.display(), err)).with_source(err)
        })?;
        let reader: Box<dyn Read> = Box::new(file);
        Self::with_origin(reader, path.display().to_string())
    }
}

impl<R: Read> TsvReader<R> {
    /// Wrap an already-open reader and consume its header line
    pub fn from_reader(reader: R) -> Result<Self> {
        Self::with_origin(reader, "<reader>")
    }

    fn with_origin(reader: R, origin: impl Into<String>) -> Result<Self> {
        let origin = origin.into();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(FIELD_SEPARATOR)
            .quoting(false)
            .comment(Some(COMMENT_PREFIX))
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let names: Vec<String> = reader
            .headers()
            .map_err(|err| TableError::header(format!("{}: {}", origin, err)).with_source(err))?
            .iter()
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            return Err(TableError::header(format!("{}: missing header line", origin)));
        }
        let header = TableHeader::new(names)
            .map_err(|err| TableError::header(format!("{}: {}", origin, err.message)))?;

        Ok(Self {
            reader,
            header,
            record: StringRecord::new(),
            origin,
        })
    }

    /// Where the rows come from, for diagnostics
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// Prefix a decode error with the file it came from
fn located(origin: &str, err: csv::Error) -> TableError {
    let mut table_err = TableError::from(err);
    table_err.message = format!("{}: {}", origin, table_err.message);
    table_err
}

impl<R: Read> RowSource for TsvReader<R> {
    fn header(&self) -> &TableHeader {
        &self.header
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        let more = self
            .reader
            .read_record(&mut self.record)
            .map_err(|err| located(&self.origin, err))?;
        if !more {
            return Ok(None);
        }

        let width = self.header.len();
        if self.record.len() > width {
            let line = self.record.position().map_or(0, |pos| pos.line() as usize);
            return Err(TableError::malformed_row(
                line,
                format!(
                    "{}: expected {} fields, found {}",
                    self.origin,
                    width,
                    self.record.len()
                ),
            ));
        }

        let mut fields: Row = self.record.iter().map(str::to_string).collect();
        fields.resize(width, String::new());
        Ok(Some(fields))
    }
}
