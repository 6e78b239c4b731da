use std::collections::BTreeMap;
use std::io;

use super::{LineStream, Storage, trim_line_end};

/// [`Storage`] over in-memory file contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: BTreeMap<String, String>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder form of [`MemoryStorage::insert`].
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn LineStream>> {
        let contents = self
            .files
            .get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))?;
        Ok(Box::new(MemoryLineStream {
            data: contents.clone(),
            pos: 0,
            closed: false,
        }))
    }
}

struct MemoryLineStream {
    data: String,
    pos: usize,
    closed: bool,
}

impl LineStream for MemoryLineStream {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        if !self.available() {
            return Ok(None);
        }

        let rest = &self.data[self.pos..];
        let len = rest.find('\n').map_or(rest.len(), |i| i + 1);
        let mut line = rest[..len].to_string();
        self.pos += len;
        trim_line_end(&mut line);
        Ok(Some(line))
    }

    fn available(&mut self) -> bool {
        !self.closed && self.pos < self.data.len()
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
