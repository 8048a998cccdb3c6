//! In-memory destination

use std::io;

use parking_lot::RwLock;

use super::traits::Destination;
use crate::render::Line;

/// In-memory destination for tests and capture
///
/// Stores every written line, terminator included. By default lines are kept
/// undecorated, which makes assertions independent of terminal color
/// detection; `MemoryDestination::decorated` keeps them as a terminal stream
/// would receive them.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use badgelog_core::{LoggerBuilder, MemoryDestination, TypeOptions};
///
/// let capture = Arc::new(MemoryDestination::new());
/// let logger = LoggerBuilder::new()
///     .with_type("info", TypeOptions::new().destination(capture.clone()))
///     .build()
///     .unwrap();
///
/// logger.method("info").unwrap().log("ready");
/// assert_eq!(capture.lines(), ["ℹ  info  ready \n"]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryDestination {
    lines: RwLock<Vec<String>>,
    decorated: bool,
}

impl MemoryDestination {
    /// Create a destination keeping undecorated lines
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a destination keeping lines with color codes
    pub fn decorated() -> Self {
        Self {
            lines: RwLock::new(Vec::new()),
            decorated: true,
        }
    }

    /// All lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.read().clone()
    }

    /// Everything written so far, concatenated
    pub fn contents(&self) -> String {
        self.lines.read().concat()
    }

    /// Get the number of lines written
    pub fn len(&self) -> usize {
        self.lines.read().len()
    }

    /// Check if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget all lines
    pub fn clear(&self) {
        self.lines.write().clear();
    }
}

impl Destination for MemoryDestination {
    fn name(&self) -> &str {
        "memory"
    }

    fn write_line(&self, line: &Line) -> io::Result<()> {
        let rendered = if self.decorated { line.decorated() } else { line.plain() };
        self.lines.write().push(Line::terminate(&rendered));
        Ok(())
    }
}
