//! Positional arguments substituted into message templates

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single positional argument of an entry.
///
/// Entries keep their arguments as values rather than pre-rendered text so
/// every writer can substitute (and style) them independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogArg {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// Description of an error, used by flush-failure reports
    Error { error: String },
    Null,
}

impl fmt::Display for LogArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogArg::String(s) => write!(f, "{}", s),
            LogArg::Int(i) => write!(f, "{}", i),
            LogArg::UInt(u) => write!(f, "{}", u),
            LogArg::Float(fl) => write!(f, "{}", fl),
            LogArg::Bool(b) => write!(f, "{}", b),
            LogArg::Error { error } => write!(f, "{}", error),
            LogArg::Null => write!(f, "null"),
        }
    }
}

impl LogArg {
    /// Wrap anything displayable as an error argument
    pub fn error(err: impl fmt::Display) -> Self {
        LogArg::Error {
            error: err.to_string(),
        }
    }

    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            LogArg::String(s) => serde_json::Value::String(s.clone()),
            LogArg::Int(i) => serde_json::Value::Number((*i).into()),
            LogArg::UInt(u) => serde_json::Value::Number((*u).into()),
            LogArg::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            LogArg::Bool(b) => serde_json::Value::Bool(*b),
            LogArg::Error { error } => serde_json::json!({ "error": error }),
            LogArg::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for LogArg {
    fn from(s: String) -> Self {
        LogArg::String(s)
    }
}

impl From<&str> for LogArg {
    fn from(s: &str) -> Self {
        LogArg::String(s.to_string())
    }
}

impl From<&String> for LogArg {
    fn from(s: &String) -> Self {
        LogArg::String(s.clone())
    }
}

impl From<i64> for LogArg {
    fn from(i: i64) -> Self {
        LogArg::Int(i)
    }
}

impl From<i32> for LogArg {
    fn from(i: i32) -> Self {
        LogArg::Int(i64::from(i))
    }
}

impl From<u32> for LogArg {
    fn from(u: u32) -> Self {
        LogArg::UInt(u64::from(u))
    }
}

impl From<u64> for LogArg {
    fn from(u: u64) -> Self {
        LogArg::UInt(u)
    }
}

impl From<usize> for LogArg {
    fn from(u: usize) -> Self {
        LogArg::UInt(u as u64)
    }
}

impl From<f64> for LogArg {
    fn from(f: f64) -> Self {
        LogArg::Float(f)
    }
}

impl From<f32> for LogArg {
    fn from(f: f32) -> Self {
        LogArg::Float(f64::from(f))
    }
}

impl From<bool> for LogArg {
    fn from(b: bool) -> Self {
        LogArg::Bool(b)
    }
}

impl<T: Into<LogArg>> From<Option<T>> for LogArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(LogArg::Null, Into::into)
    }
}

/// Ordered argument list accepted by every logging call.
///
/// Built from `()` for no arguments, or from an array / `Vec` of anything
/// convertible into [`LogArg`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogArgs(Vec<LogArg>);

impl LogArgs {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn into_vec(self) -> Vec<LogArg> {
        self.0
    }
}

impl From<()> for LogArgs {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl<T: Into<LogArg>> From<Vec<T>> for LogArgs {
    fn from(values: Vec<T>) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<LogArg>, const N: usize> From<[T; N]> for LogArgs {
    fn from(values: [T; N]) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(LogArg::from("Alice").to_string(), "Alice");
        assert_eq!(LogArg::from(42).to_string(), "42");
        assert_eq!(LogArg::from(true).to_string(), "true");
        assert_eq!(LogArg::from(None::<i32>).to_string(), "null");
        assert_eq!(LogArg::error("disk full").to_string(), "disk full");
    }

    #[test]
    fn test_args_conversions() {
        assert!(LogArgs::from(()).into_vec().is_empty());

        let args = LogArgs::from(["a", "b"]).into_vec();
        assert_eq!(args, vec![LogArg::from("a"), LogArg::from("b")]);

        let args = LogArgs::from(vec![LogArg::from(1), LogArg::from("x")]).into_vec();
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_json_value() {
        assert_eq!(LogArg::from(7u64).to_json_value(), serde_json::json!(7));
        assert_eq!(
            LogArg::error("boom").to_json_value(),
            serde_json::json!({ "error": "boom" })
        );
        assert_eq!(LogArg::Float(f64::NAN).to_json_value(), serde_json::Value::Null);
    }
}
