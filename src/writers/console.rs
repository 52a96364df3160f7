//! Console writer implementation

use crate::core::{template, LogArg, LogEntry, LogType, LogWriter, Result, TimestampFormat};
use chrono::{Local, NaiveDate};
use colored::{Color, Colorize};
use std::io::{self, Write};

/// ANSI clear-screen and cursor-home sequence
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Colors used by [`ConsoleWriter`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsoleTheme {
    pub text: Color,
    pub title: Color,
    pub date: Color,
    pub success: Color,
    pub warning: Color,
    pub info: Color,
    pub debug: Color,
    pub error: Color,
    pub highlight: Color,
    /// Substituted template arguments
    pub emphasis: Color,
    pub scope: Color,
}

impl ConsoleTheme {
    pub fn color_for(&self, log_type: LogType) -> Color {
        match log_type {
            LogType::Debug => self.debug,
            LogType::Info => self.info,
            LogType::Success => self.success,
            LogType::Error => self.error,
            LogType::Warning => self.warning,
            LogType::Highlight => self.highlight,
            LogType::Raw => self.text,
        }
    }
}

impl Default for ConsoleTheme {
    fn default() -> Self {
        Self {
            text: Color::White,
            title: Color::Cyan,
            date: Color::BrightBlack,
            success: Color::Green,
            warning: Color::Yellow,
            info: Color::Blue,
            debug: Color::Magenta,
            error: Color::Red,
            highlight: Color::BrightYellow,
            emphasis: Color::BrightWhite,
            scope: Color::BrightBlue,
        }
    }
}

/// Human-readable lines of the form `[10:30:45] [Scope] Info: message`.
///
/// A date banner is written before the first entry and whenever the local
/// date changes between two entries.
///
/// # Example
///
/// ```
/// use logora::writers::{ConsoleWriter, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let writer = ConsoleWriter::new()
///     .with_colors(false)
///     .with_sink(buffer.clone());
/// ```
pub struct ConsoleWriter {
    sink: Box<dyn Write + Send>,
    use_colors: bool,
    theme: ConsoleTheme,
    timestamp_format: TimestampFormat,
    date_banner: bool,
    last_date: Option<NaiveDate>,
}

impl ConsoleWriter {
    /// Colored writer on stdout
    pub fn new() -> Self {
        Self {
            sink: Box::new(io::stdout()),
            use_colors: true,
            theme: ConsoleTheme::default(),
            timestamp_format: TimestampFormat::Clock,
            date_banner: true,
            last_date: None,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ConsoleTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the timestamp format for this writer
    ///
    /// # Examples
    ///
    /// ```
    /// use logora::writers::ConsoleWriter;
    /// use logora::TimestampFormat;
    ///
    /// let writer = ConsoleWriter::new()
    ///     .with_timestamp_format(TimestampFormat::Iso8601);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_date_banner(mut self, enabled: bool) -> Self {
        self.date_banner = enabled;
        self
    }

    /// Write to `sink` instead of stdout
    #[must_use]
    pub fn with_sink<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.sink = Box::new(sink);
        self
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_entry(&self, entry: &LogEntry) -> String {
        let timestamp = self.timestamp_format.format(&entry.timestamp);
        let mut line = self.paint(&format!("[{}]", timestamp), self.theme.date);
        line.push(' ');

        if let Some(ref scope) = entry.scope {
            line.push_str(&self.paint(&format!("[{}]", scope), self.theme.scope));
            line.push(' ');
        }

        let label = format!("{}:", entry.log_type.label());
        let label = match (self.use_colors, entry.log_type) {
            (true, LogType::Highlight) => label.color(self.theme.highlight).bold().to_string(),
            _ => self.paint(&label, self.theme.color_for(entry.log_type)),
        };
        line.push_str(&label);
        line.push(' ');

        line.push_str(&template::format_with(&entry.message, &entry.args, |arg| {
            self.paint(&arg.to_string(), self.theme.emphasis)
        }));
        line
    }

    fn write_date_banner(&mut self, entry: &LogEntry) -> Result<()> {
        let date = entry.timestamp.with_timezone(&Local).date_naive();
        if self.last_date == Some(date) {
            return Ok(());
        }
        self.last_date = Some(date);

        let banner = self.paint(&date.format("%A, %B %-d %Y").to_string(), self.theme.date);
        writeln!(self.sink, "{}", banner)?;
        Ok(())
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogWriter for ConsoleWriter {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        if self.date_banner {
            self.write_date_banner(entry)?;
        }
        let line = self.format_entry(entry);
        writeln!(self.sink, "{}", line)?;
        Ok(())
    }

    fn title(&mut self, title: &str) -> Result<()> {
        let underline = "=".repeat(title.chars().count());
        let (title, underline) = if self.use_colors {
            (
                title.color(self.theme.title).bold().to_string(),
                underline.color(self.theme.title).to_string(),
            )
        } else {
            (title.to_string(), underline)
        };
        writeln!(self.sink, "{}\n{}", title, underline)?;
        Ok(())
    }

    fn empty(&mut self, count: usize) -> Result<()> {
        self.sink.write_all("\n".repeat(count).as_bytes())?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.use_colors {
            self.sink.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        self.last_date = None;
        Ok(())
    }

    fn print(&mut self, message: &str, args: &[LogArg]) -> Result<()> {
        let text = template::format(message, args);
        let text = self.paint(&text, self.theme.text);
        writeln!(self.sink, "{}", text)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    fn set_timestamp_format(&mut self, format: TimestampFormat) {
        self.timestamp_format = format;
    }
}
