//! Error types for the paging simulator.

use thiserror::Error;

/// Result type alias using SimError.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur while configuring or loading a simulation.
///
/// Broken engine invariants are not represented here; they panic.
#[derive(Debug, Error)]
pub enum SimError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter { name: String, value: String },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("No trace files supplied")]
    NoTraces,

    // Trace errors
    #[error("Trace {trace} has no numeric process identifier")]
    MissingProcessId { trace: String },

    #[error("Invalid instruction in {trace} at line {line}: {text:?}")]
    InvalidInstruction {
        trace: String,
        line: usize,
        text: String,
    },
}

impl SimError {
    /// Returns true if the error should stop the simulation before it starts.
    ///
    /// Trace read problems are reported but the affected process keeps the
    /// pages read before the failure.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SimError::Io(_) | SimError::InvalidInstruction { .. })
    }
}
