//! Stream destinations (stdout, stderr, arbitrary writers)

use std::fmt;
use std::io::{self, Write};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::traits::Destination;
use crate::render::Line;

/// Standard streams selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamTarget {
    Stdout,
    Stderr,
}

impl StreamTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamTarget::Stdout => "stdout",
            StreamTarget::Stderr => "stderr",
        }
    }

    /// Open a destination writing to this stream
    pub fn destination(&self) -> StreamDestination {
        match self {
            StreamTarget::Stdout => StreamDestination::stdout(),
            StreamTarget::Stderr => StreamDestination::stderr(),
        }
    }
}

/// A destination writing decorated lines to a byte stream
///
/// Lines carry color codes (subject to `colored`'s global control). Each line
/// is written and flushed under the writer's lock, so lines from concurrent
/// callers never interleave.
pub struct StreamDestination {
    name: String,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl StreamDestination {
    /// Create a destination over any writer
    pub fn new(name: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// The process's standard output
    pub fn stdout() -> Self {
        Self::new(StreamTarget::Stdout.as_str(), io::stdout())
    }

    /// The process's standard error
    pub fn stderr() -> Self {
        Self::new(StreamTarget::Stderr.as_str(), io::stderr())
    }
}

impl Destination for StreamDestination {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_line(&self, line: &Line) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(Line::terminate(&line.decorated()).as_bytes())?;
        writer.flush()
    }
}

impl fmt::Debug for StreamDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamDestination")
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Renderer;
    use crate::types::Message;
    use colored::Color;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stream_destination_writes_terminated_lines() {
        let buffer = SharedBuffer::default();
        let destination = StreamDestination::new("buffer", buffer.clone());
        let renderer = Renderer::new("ℹ", "info", 0, Color::Blue, true);

        for line in renderer.render(&Message::from("first")) {
            destination.write_line(&line).unwrap();
        }

        let written = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert!(written.contains("first"));
        assert!(written.ends_with(" \n"));
        assert_eq!(written.matches('\n').count(), 1);
    }

    #[test]
    fn test_stream_target_names() {
        assert_eq!(StreamTarget::Stdout.destination().name(), "stdout");
        assert_eq!(StreamTarget::Stderr.destination().name(), "stderr");
    }

    #[test]
    fn test_stream_target_deserialize() {
        let targets: Vec<StreamTarget> = serde_json::from_str(r#"["stdout", "stderr"]"#).unwrap();
        assert_eq!(targets, [StreamTarget::Stdout, StreamTarget::Stderr]);
    }
}
