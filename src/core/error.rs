//! Error types for the logger system

use std::time::Duration;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A writer reported a failure while rendering
    #[error("Output '{output}' failed: {message}")]
    WriterFailed { output: String, message: String },

    /// A writer panicked while rendering
    #[error("Output '{output}' panicked: {message}")]
    WriterPanicked { output: String, message: String },

    /// The queue did not drain within the allotted time
    #[error("Flush did not complete within {0:?}")]
    FlushTimeout(Duration),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a writer failure error
    pub fn writer(output: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::WriterFailed {
            output: output.into(),
            message: message.into(),
        }
    }

    /// Create a writer panic error
    pub fn writer_panic(output: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::WriterPanicked {
            output: output.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether the error came from a writer panicking rather than returning `Err`
    #[must_use]
    pub fn is_panic(&self) -> bool {
        matches!(self, LoggerError::WriterPanicked { .. })
    }
}
