//! Error types for edgetab-io

use std::fmt;
use thiserror::Error;

/// Table error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Underlying read/write failures (file open, stdin/stdout, flush)
    Io,
    /// Missing, empty or duplicated header columns
    Header,
    /// A data row that does not fit the header
    MalformedRow,
    /// A write that does not match the sink's column schema
    Schema,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Io => "io",
            ErrorKind::Header => "header",
            ErrorKind::MalformedRow => "malformed_row",
            ErrorKind::Schema => "schema",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Table error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct TableError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl TableError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn header(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Header, message)
    }

    pub fn malformed_row(line: usize, message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::MalformedRow,
            format!("line {}: {}", line, message.into()),
        )
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Schema, message)
    }
}

impl From<std::io::Error> for TableError {
    fn from(err: std::io::Error) -> Self {
        TableError::io(format!("I/O error: {}", err)).with_source(err)
    }
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        let is_io = matches!(err.kind(), csv::ErrorKind::Io(_));
        let line = err.position().map(|pos| pos.line() as usize);
        let table_err = match line {
            _ if is_io => TableError::io(format!("I/O error: {}", message)),
            Some(line) => TableError::malformed_row(line, message),
            None => TableError::new(ErrorKind::MalformedRow, message),
        };
        table_err.with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TableError>;
