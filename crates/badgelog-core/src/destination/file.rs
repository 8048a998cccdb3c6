//! File destination (append-only, undecorated)

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::traits::Destination;
use crate::error::LogResult;
use crate::render::Line;

/// A destination appending lines to a file
///
/// Lines are written without color codes. The file is created when missing
/// and opened once, in append mode; writes through one destination keep
/// their order.
#[derive(Debug)]
pub struct FileDestination {
    path: PathBuf,
    name: String,
    file: Mutex<File>,
}

impl FileDestination {
    /// Open (or create) `path` for appending
    pub fn open(path: impl Into<PathBuf>) -> LogResult<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        crate::diag_debug!("opened file destination {}", path.display());

        Ok(Self {
            name: path.display().to_string(),
            path,
            file: Mutex::new(file),
        })
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Destination for FileDestination {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_line(&self, line: &Line) -> io::Result<()> {
        let mut file = self.file.lock();
        file.write_all(Line::terminate(&line.plain()).as_bytes())?;
        file.flush()
    }
}
