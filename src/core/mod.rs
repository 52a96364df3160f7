//! Core logger types and traits

pub mod config;
pub mod error;
pub mod log_arg;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output;
pub mod queue;
pub mod template;
pub mod timestamp;
pub mod writer;

pub use config::{
    ConfigOverrides, DropHook, ErrorHook, FlushMode, LoggerConfig, QueueLimit, DEFAULT_QUEUE_LIMIT,
};
pub use error::{LoggerError, Result};
pub use log_arg::{LogArg, LogArgs};
pub use log_entry::{LogEntry, FLUSH_ERROR_MESSAGE};
pub use log_level::{LogLevel, LogType};
pub use logger::{Logger, LoggerBuilder, DEFAULT_FLUSH_TIMEOUT, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use output::{Output, OutputOptions};
pub use queue::{PendingWrite, QueuedWrite, WriteOp};
pub use timestamp::TimestampFormat;
pub use writer::LogWriter;
