//! Log level and log type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum severity an output accepts.
///
/// Levels are compared through [`LogLevel::rank`]: a lower rank is more
/// urgent. An output configured at a level receives every entry whose rank is
/// less than or equal to its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[serde(alias = "warn")]
    Warning,
    Success,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Success,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// Numeric urgency used for filtering only. Error=0 ... Debug=4.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warning => 1,
            LogLevel::Success => 2,
            LogLevel::Info => 3,
            LogLevel::Debug => 4,
        }
    }

    /// Whether an output configured at `self` accepts an entry of `severity`
    #[inline]
    #[must_use]
    pub const fn permits(self, severity: LogLevel) -> bool {
        self.rank() >= severity.rank()
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Success => "SUCCESS",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "SUCCESS" => Ok(LogLevel::Success),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Semantic category of an entry, independent of its filtering severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogType {
    Debug = 0,
    Info = 1,
    Success = 2,
    Error = 3,
    Warning = 4,
    Highlight = 5,
    Raw = 6,
}

impl LogType {
    /// Severity used for per-output filtering.
    ///
    /// `None` means the entry bypasses filtering and reaches every output.
    #[must_use]
    pub const fn severity(self) -> Option<LogLevel> {
        match self {
            LogType::Debug => Some(LogLevel::Debug),
            LogType::Info => Some(LogLevel::Info),
            LogType::Success => Some(LogLevel::Success),
            LogType::Error => Some(LogLevel::Error),
            LogType::Warning => Some(LogLevel::Warning),
            LogType::Highlight | LogType::Raw => None,
        }
    }

    /// Look up a type by its numeric code
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(LogType::Debug),
            1 => Some(LogType::Info),
            2 => Some(LogType::Success),
            3 => Some(LogType::Error),
            4 => Some(LogType::Warning),
            5 => Some(LogType::Highlight),
            6 => Some(LogType::Raw),
            _ => None,
        }
    }

    /// Human-readable label writers put in front of a message
    pub fn label(&self) -> &'static str {
        match self {
            LogType::Debug => "Debug",
            LogType::Info => "Info",
            LogType::Success => "Success",
            LogType::Error => "Error",
            LogType::Warning => "Warning",
            LogType::Highlight => "Highlight",
            LogType::Raw => "Raw",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<LogLevel> for LogType {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LogType::Error,
            LogLevel::Warning => LogType::Warning,
            LogLevel::Success => LogType::Success,
            LogLevel::Info => LogType::Info,
            LogLevel::Debug => LogType::Debug,
        }
    }
}
