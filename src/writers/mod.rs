//! Writer implementations

pub mod buffer;
pub mod config;
pub mod file;
pub mod json;
pub mod memory;

#[cfg(feature = "console")]
pub mod console;

pub use buffer::SharedBuffer;
pub use config::{LoggerDocument, OutputConfig, WriterKind};
pub use file::FileWriter;
pub use json::JsonWriter;
pub use memory::{MemoryWriter, WriterCall};

#[cfg(feature = "console")]
pub use console::{ConsoleTheme, ConsoleWriter};

pub use crate::core::LogWriter;
