//! Logger configuration
//!
//! [`LoggerConfig`] holds the documented defaults. Partial configuration comes
//! in as [`ConfigOverrides`], where every field is optional, and is applied with
//! [`LoggerConfig::merge`]: a field that is present replaces the default, a
//! field that is absent leaves it alone.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default queue capacity
pub const DEFAULT_QUEUE_LIMIT: usize = 1000;

/// Capacity of the pending-write queue.
///
/// `Bounded(0)` behaves like `Unbounded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueLimit {
    Bounded(usize),
    Unbounded,
}

impl QueueLimit {
    /// Capacity to enforce, `None` when the check is disabled
    #[inline]
    #[must_use]
    pub fn capacity(self) -> Option<usize> {
        match self {
            QueueLimit::Bounded(0) | QueueLimit::Unbounded => None,
            QueueLimit::Bounded(n) => Some(n),
        }
    }
}

impl Default for QueueLimit {
    fn default() -> Self {
        QueueLimit::Bounded(DEFAULT_QUEUE_LIMIT)
    }
}

impl fmt::Display for QueueLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueLimit::Bounded(n) => write!(f, "Bounded({})", n),
            QueueLimit::Unbounded => write!(f, "Unbounded"),
        }
    }
}

/// Where flush cycles run once requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlushMode {
    /// A dedicated consumer thread drains the queue
    #[default]
    Worker,
    /// The host drains the queue by calling `Logger::flush`
    Manual,
}

/// Hook invoked when a writer fails: the error and a synthesized Error-type entry
pub type ErrorHook = Arc<dyn Fn(&LoggerError, &LogEntry) + Send + Sync>;

/// Hook invoked with every entry dropped because the queue was full
pub type DropHook = Arc<dyn Fn(&LogEntry) + Send + Sync>;

/// Complete logger configuration with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Level used by outputs that do not set their own
    pub level: LogLevel,
    pub queue_limit: QueueLimit,
    pub flush_mode: FlushMode,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            queue_limit: QueueLimit::default(),
            flush_mode: FlushMode::default(),
        }
    }
}

impl LoggerConfig {
    /// Apply every override that is present
    #[must_use]
    pub fn merge(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(level) = overrides.level {
            self.level = level;
        }
        if let Some(queue_limit) = overrides.queue_limit {
            self.queue_limit = queue_limit;
        }
        if let Some(flush_mode) = overrides.flush_mode {
            self.flush_mode = flush_mode;
        }
        self
    }
}

/// Partial configuration. Unset fields keep their defaults.
///
/// # Example
///
/// ```
/// use logora::{ConfigOverrides, LoggerConfig, LogLevel, QueueLimit};
///
/// let overrides = ConfigOverrides::from_json(r#"{ "level": "debug" }"#).unwrap();
/// let config = LoggerConfig::default().merge(&overrides);
///
/// assert_eq!(config.level, LogLevel::Debug);
/// assert_eq!(config.queue_limit, QueueLimit::Bounded(1000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub level: Option<LogLevel>,
    pub queue_limit: Option<QueueLimit>,
    pub flush_mode: Option<FlushMode>,
}

impl ConfigOverrides {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.queue_limit, QueueLimit::Bounded(1000));
        assert_eq!(config.flush_mode, FlushMode::Worker);
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let overrides = ConfigOverrides {
            queue_limit: Some(QueueLimit::Unbounded),
            ..Default::default()
        };
        let config = LoggerConfig::default().merge(&overrides);
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.queue_limit, QueueLimit::Unbounded);
        assert_eq!(config.flush_mode, FlushMode::Worker);
    }

    #[test]
    fn test_merge_empty_is_identity() {
        let config = LoggerConfig {
            level: LogLevel::Error,
            queue_limit: QueueLimit::Bounded(5),
            flush_mode: FlushMode::Manual,
        };
        assert_eq!(config.clone().merge(&ConfigOverrides::default()), config);
    }

    #[test]
    fn test_overrides_from_json() {
        let overrides = ConfigOverrides::from_json(
            r#"{ "level": "warning", "queue_limit": "unbounded", "flush_mode": "manual" }"#,
        )
        .unwrap();
        assert_eq!(overrides.level, Some(LogLevel::Warning));
        assert_eq!(overrides.queue_limit, Some(QueueLimit::Unbounded));
        assert_eq!(overrides.flush_mode, Some(FlushMode::Manual));

        let overrides = ConfigOverrides::from_json(r#"{ "queue_limit": { "bounded": 50 } }"#).unwrap();
        assert_eq!(overrides.queue_limit, Some(QueueLimit::Bounded(50)));
    }

    #[test]
    fn test_overrides_reject_unknown_fields() {
        let err = ConfigOverrides::from_json(r#"{ "levle": "debug" }"#).unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_queue_capacity() {
        assert_eq!(QueueLimit::Bounded(10).capacity(), Some(10));
        assert_eq!(QueueLimit::Bounded(0).capacity(), None);
        assert_eq!(QueueLimit::Unbounded.capacity(), None);
        assert_eq!(QueueLimit::default().to_string(), "Bounded(1000)");
    }
}
