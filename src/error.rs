//! Error types for the Tip Pool Engine.
//!
//! The allocation core never fails: malformed amounts and hours coerce to
//! zero. The errors here belong to the layers around it, namely configuration
//! loading and pay period construction.

use thiserror::Error;

/// The main error type for the Tip Pool Engine.
///
/// # Example
///
/// ```
/// use tip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/pool.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/pool.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot work with.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A pay period could not be built from the requested bounds.
    #[error("Invalid pay period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
