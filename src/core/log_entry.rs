//! Log entry structure

use super::log_arg::LogArg;
use super::log_level::{LogLevel, LogType};
use super::template;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message of the entry handed to the error hook when a write fails
pub const FLUSH_ERROR_MESSAGE: &str = "flush error";

/// One logging event. Never mutated after construction; the dispatcher shares
/// a single entry between all outputs that accept it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub log_type: LogType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<LogArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl LogEntry {
    pub fn new(log_type: LogType, message: impl Into<String>, args: Vec<LogArg>) -> Self {
        Self {
            timestamp: Utc::now(),
            log_type,
            message: message.into(),
            args,
            scope: None,
        }
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }

    /// Entry reported alongside a writer failure
    pub fn flush_error(error: &impl fmt::Display, scope: Option<String>) -> Self {
        Self::new(
            LogType::Error,
            FLUSH_ERROR_MESSAGE,
            vec![LogArg::error(error)],
        )
        .with_scope(scope)
    }

    /// Severity used for filtering, `None` for entries that bypass it
    #[inline]
    pub fn severity(&self) -> Option<LogLevel> {
        self.log_type.severity()
    }

    /// The message with all in-bounds placeholders substituted
    pub fn render(&self) -> String {
        template::format(&self.message, &self.args)
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "[{}] {}: {}", scope, self.log_type, self.render()),
            None => write!(f, "{}: {}", self.log_type, self.render()),
        }
    }
}
