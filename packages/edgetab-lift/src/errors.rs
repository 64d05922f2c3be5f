//! Error types for edgetab-lift
//!
//! Every error is fatal for a lift run: the first one is propagated after the
//! open sources and sinks have been dropped.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for lift operations
#[derive(Debug, Error)]
pub enum LiftError {
    /// Unresolvable column role or conflicting options
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input data that makes the run meaningless (e.g. no labels at all)
    #[error("Data error: {0}")]
    Data(String),

    /// Row source or sink failure
    #[error("Table error: {0}")]
    Table(#[from] edgetab_io::TableError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LiftError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        LiftError::Config(msg.into())
    }

    /// Create a data error
    pub fn data(msg: impl Into<String>) -> Self {
        LiftError::Data(msg.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, LiftError::Config(_))
    }

    pub fn is_data(&self) -> bool {
        matches!(self, LiftError::Data(_))
    }
}

impl From<ConfigError> for LiftError {
    fn from(err: ConfigError) -> Self {
        LiftError::Config(err.to_string())
    }
}

/// Result type alias for lift operations
pub type Result<T> = std::result::Result<T, LiftError>;
