//! # Logora
//!
//! A leveled, templated logging façade. Every call builds one entry, filters it
//! against each registered output's own level, and queues a write per accepted
//! output. A single flush cycle drains the bounded queue in call order, so the
//! caller never waits on I/O.
//!
//! ## Features
//!
//! - **Per-output filtering**: each output keeps its own minimum level
//! - **Templates**: `{0}`, `{1}`... placeholders resolved by each writer
//! - **Bounded queue**: overflowing writes are dropped and reported to a hook
//! - **Failure isolation**: a failing or panicking writer never affects the others
//! - **Scoped loggers**: labelled loggers sharing one registry and queue
//!
//! ## Example
//!
//! ```
//! use logora::prelude::*;
//! use logora::writers::MemoryWriter;
//!
//! let memory = MemoryWriter::new();
//! let logger = Logger::builder()
//!     .level(LogLevel::Debug)
//!     .output(Output::new("memory", memory.clone()).with_level(LogLevel::Warning))
//!     .build();
//!
//! logger.info("not shown", ());
//! logger.warning("disk at {0}%", [91]);
//! logger.scoped("DB").error("connection lost", ());
//! logger.flush().unwrap();
//!
//! assert_eq!(memory.rendered(), vec!["disk at 91%", "connection lost"]);
//! ```

pub mod core;
pub mod macros;
pub mod writers;

pub mod prelude {
    pub use crate::core::{
        ConfigOverrides, FlushMode, LogArg, LogArgs, LogEntry, LogLevel, LogType, LogWriter,
        Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Output, OutputOptions,
        QueueLimit, Result, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    #[cfg(feature = "console")]
    pub use crate::writers::ConsoleWriter;
    pub use crate::writers::{FileWriter, JsonWriter};
}

pub use crate::core::{
    ConfigOverrides, DropHook, ErrorHook, FlushMode, LogArg, LogArgs, LogEntry, LogLevel, LogType,
    LogWriter, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Output,
    OutputOptions, QueueLimit, Result, TimestampFormat, DEFAULT_FLUSH_TIMEOUT,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
#[cfg(feature = "console")]
pub use crate::writers::ConsoleWriter;
pub use crate::writers::{FileWriter, JsonWriter};
