//! Writer trait for log output destinations

use super::{error::Result, log_arg::LogArg, log_entry::LogEntry, timestamp::TimestampFormat};

/// Rendering capability of an output.
///
/// The dispatcher only ever calls these operations and treats an `Err` (or a
/// panic) from any of them as an isolated failure of that one write.
pub trait LogWriter: Send {
    /// Render a structured entry (every type except [`LogType::Raw`](super::LogType::Raw))
    fn log(&mut self, entry: &LogEntry) -> Result<()>;

    /// Render a section title
    fn title(&mut self, title: &str) -> Result<()>;

    /// Emit `count` blank lines
    fn empty(&mut self, count: usize) -> Result<()>;

    /// Clear the output surface
    fn clear(&mut self) -> Result<()>;

    /// Write a raw message without level, timestamp or scope
    fn print(&mut self, message: &str, args: &[LogArg]) -> Result<()>;

    /// Push buffered output to its sink
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Switch the timestamp rendering. Writers without timestamps ignore it.
    fn set_timestamp_format(&mut self, _format: TimestampFormat) {}
}

impl<W: LogWriter + ?Sized> LogWriter for Box<W> {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        (**self).log(entry)
    }

    fn title(&mut self, title: &str) -> Result<()> {
        (**self).title(title)
    }

    fn empty(&mut self, count: usize) -> Result<()> {
        (**self).empty(count)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }

    fn print(&mut self, message: &str, args: &[LogArg]) -> Result<()> {
        (**self).print(message, args)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn set_timestamp_format(&mut self, format: TimestampFormat) {
        (**self).set_timestamp_format(format)
    }
}
