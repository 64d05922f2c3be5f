//! Lift configuration
//!
//! One immutable `LiftConfig` is resolved before processing starts and is
//! passed by shared reference to every resolver and processor.
//!
//! # Examples
//!
//! ```rust
//! use edgetab_lift::config::{LiftConfig, Validatable};
//!
//! // Programmatic construction
//! let config = LiftConfig::default()
//!     .columns_to_lift(["node2"])
//!     .suppress_empty_columns(true);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ```rust,ignore
//! // YAML file (schema v1)
//! let config = LiftConfig::from_yaml("lift.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod lift_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use lift_config::{
    LiftConfig, DEFAULT_LABEL_SELECT_VALUE, DEFAULT_LIFT_SUFFIX, LIST_SEPARATOR,
};
pub use validation::Validatable;
