//! Destination trait definition

use std::io;
use std::sync::Arc;

use crate::render::Line;

/// A sink for rendered log lines
///
/// Implementations:
/// - `StreamDestination`: terminal streams and arbitrary writers, colored
/// - `FileDestination`: appends undecorated lines to a file
/// - `MemoryDestination`: keeps lines in memory, for tests and capture
///
/// Each call writes one physical line, including its `" \n"` terminator.
/// Implementations report failures as they see them; retrying is left to the
/// caller.
pub trait Destination: Send + Sync {
    /// Human-readable name, used in error reports
    fn name(&self) -> &str;

    /// Write one line
    fn write_line(&self, line: &Line) -> io::Result<()>;
}

/// Type alias for an Arc-wrapped destination
pub type SharedDestination = Arc<dyn Destination>;
