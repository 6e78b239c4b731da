//! Line-oriented access to drawing files.

/// Directory-backed storage.
pub mod fs;
/// In-memory storage for tests and simulation.
pub mod memory;

use std::io;

/// Storage that can locate and open drawing files by path.
pub trait Storage {
    /// Whether `path` names an existing file.
    fn exists(&self, path: &str) -> bool;

    /// Open `path` for sequential line reads.
    fn open(&self, path: &str) -> io::Result<Box<dyn LineStream>>;
}

/// Sequential reader over one open file.
///
/// Implementations hold at most one buffered chunk; nothing beyond that is read ahead.
pub trait LineStream {
    /// Read the next line without its terminator (`\n` or `\r\n`). `None` at end of stream.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Whether any unread bytes remain.
    fn available(&mut self) -> bool;

    /// Release the underlying resource. Further reads return `None`.
    fn close(&mut self);
}

pub(crate) fn trim_line_end(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}
