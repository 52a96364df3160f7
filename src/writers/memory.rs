//! In-memory writer that records every call
//!
//! Clones share one buffer, so a test can hand a clone to the logger and
//! inspect the original afterwards.

use crate::core::{LogArg, LogEntry, LogWriter, LoggerError, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// One call received by a [`MemoryWriter`]
#[derive(Debug, Clone, PartialEq)]
pub enum WriterCall {
    Log(LogEntry),
    Title(String),
    Empty(usize),
    Clear,
    Print { message: String, args: Vec<LogArg> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Behavior {
    #[default]
    Record,
    Fail,
    Panic,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    calls: Arc<Mutex<Vec<WriterCall>>>,
    behavior: Behavior,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer whose every operation returns an error
    pub fn failing() -> Self {
        Self {
            behavior: Behavior::Fail,
            ..Self::default()
        }
    }

    /// Writer whose every operation panics
    pub fn panicking() -> Self {
        Self {
            behavior: Behavior::Panic,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<WriterCall> {
        self.calls.lock().clone()
    }

    /// Entries received through `log`
    pub fn entries(&self) -> Vec<LogEntry> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                WriterCall::Log(entry) => Some(entry.clone()),
                _ => None,
            })
            .collect()
    }

    /// Message templates of logged entries and printed messages, in order
    pub fn messages(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                WriterCall::Log(entry) => Some(entry.message.clone()),
                WriterCall::Print { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Logged entries with their placeholders substituted
    pub fn rendered(&self) -> Vec<String> {
        self.entries().iter().map(LogEntry::render).collect()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    pub fn reset(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: WriterCall) -> Result<()> {
        match self.behavior {
            Behavior::Record => {
                self.calls.lock().push(call);
                Ok(())
            }
            Behavior::Fail => Err(LoggerError::writer("memory", "simulated failure")),
            Behavior::Panic => panic!("simulated writer panic"),
        }
    }
}

impl LogWriter for MemoryWriter {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        self.record(WriterCall::Log(entry.clone()))
    }

    fn title(&mut self, title: &str) -> Result<()> {
        self.record(WriterCall::Title(title.to_string()))
    }

    fn empty(&mut self, count: usize) -> Result<()> {
        self.record(WriterCall::Empty(count))
    }

    fn clear(&mut self) -> Result<()> {
        self.record(WriterCall::Clear)
    }

    fn print(&mut self, message: &str, args: &[LogArg]) -> Result<()> {
        self.record(WriterCall::Print {
            message: message.to_string(),
            args: args.to_vec(),
        })
    }
}
