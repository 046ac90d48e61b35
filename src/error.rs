//! Error types for the multi-select crate
//!
//! The foundation itself never fails; invalid input is ignored there.
//! These errors come from building a widget and from its configuration.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for multi-select operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the multi-select crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Missing required element: {element}")]
    MissingElement { element: String },
}
