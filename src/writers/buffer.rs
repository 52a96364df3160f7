//! Shared in-memory byte sink

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// A `Write` sink whose clones append to the same buffer.
///
/// Handy for pointing a [`ConsoleWriter`](super::ConsoleWriter) or
/// [`JsonWriter`](super::JsonWriter) at memory and reading back what it wrote.
///
/// # Example
///
/// ```
/// use logora::writers::SharedBuffer;
/// use std::io::Write;
///
/// let buffer = SharedBuffer::new();
/// let mut sink = buffer.clone();
/// writeln!(sink, "hello").unwrap();
///
/// assert_eq!(buffer.lines(), vec!["hello"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
