use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::{LineStream, Storage, trim_line_end};

/// [`Storage`] rooted at a directory, standing in for the card's filesystem.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Resolve drawing paths relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl Storage for FsStorage {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn LineStream>> {
        let file = File::open(self.resolve(path))?;
        Ok(Box::new(FileLineStream {
            reader: Some(BufReader::new(file)),
        }))
    }
}

struct FileLineStream {
    reader: Option<BufReader<File>>,
}

impl LineStream for FileLineStream {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        // Card files are raw bytes; stray non-UTF-8 bytes become U+FFFD.
        let mut raw = Vec::new();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&raw).into_owned();
        trim_line_end(&mut line);
        Ok(Some(line))
    }

    fn available(&mut self) -> bool {
        self.reader
            .as_mut()
            .and_then(|r| r.fill_buf().ok())
            .is_some_and(|buf| !buf.is_empty())
    }

    fn close(&mut self) {
        self.reader = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/fs.rs"]
mod tests;
