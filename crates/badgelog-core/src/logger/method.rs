//! Log methods

use std::fmt;
use std::sync::Arc;

use super::options::TypeConfig;
use crate::error::{LogError, LogResult};
use crate::render::{Line, Renderer};
use crate::types::Message;

struct MethodInner {
    name: String,
    config: TypeConfig,
    renderer: Renderer,
}

/// A callable log method for one type
///
/// Cloning is cheap; clones share the resolved configuration. Calls are
/// synchronous: every line is written to every destination before returning.
#[derive(Clone)]
pub struct LogMethod {
    inner: Arc<MethodInner>,
}

impl LogMethod {
    pub(crate) fn new(name: impl Into<String>, config: TypeConfig) -> Self {
        let renderer = config.renderer();
        Self {
            inner: Arc::new(MethodInner {
                name: name.into(),
                config,
                renderer,
            }),
        }
    }

    /// The type name this method was created under
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn config(&self) -> &TypeConfig {
        &self.inner.config
    }

    /// Render a message without writing it
    pub fn render(&self, message: &Message) -> Vec<Line> {
        self.inner.renderer.render(message)
    }

    /// Log a message
    ///
    /// Write failures are not reported to the caller: a failing destination
    /// is skipped for the rest of the call and the failure is recorded in the
    /// diagnostics log. Use [`LogMethod::try_log`] to observe them.
    pub fn log(&self, message: impl Into<Message>) {
        if let Err(err) = self.try_log(message) {
            crate::diag_warn!("{}: dropped write failure: {}", self.name(), err);
        }
    }

    /// Log a message, returning the first write failure
    ///
    /// Every line is still offered to the destinations that have not failed.
    pub fn try_log(&self, message: impl Into<Message>) -> LogResult<()> {
        let message = message.into();
        let destinations = self.inner.config.destinations();
        let mut failed = vec![false; destinations.len()];
        let mut first_error = None;

        for line in self.render(&message) {
            for (index, destination) in destinations.iter().enumerate() {
                if failed[index] {
                    continue;
                }
                if let Err(source) = destination.write_line(&line) {
                    failed[index] = true;
                    first_error.get_or_insert(LogError::Destination {
                        name: destination.name().to_string(),
                        source,
                    });
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for LogMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogMethod")
            .field("name", &self.inner.name)
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Log a printf-style message through a [`LogMethod`]
///
/// Arguments are converted with `serde_json::json!`.
///
/// ```
/// use std::sync::Arc;
/// use badgelog_core::{logf, LoggerBuilder, MemoryDestination, TypeOptions};
///
/// let capture = Arc::new(MemoryDestination::new());
/// let logger = LoggerBuilder::new()
///     .with_type("info", TypeOptions::new().destination(capture.clone()))
///     .build()
///     .unwrap();
///
/// let info = logger.method("info").unwrap();
/// logf!(info, "%s took %dms", "build", 42);
/// assert_eq!(capture.lines(), ["ℹ  info  build took 42ms \n"]);
/// ```
#[macro_export]
macro_rules! logf {
    ($method:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $method.log($crate::Message::format(
            $template,
            ::std::vec![$($crate::serde_json::json!($arg)),*],
        ))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::{Destination, MemoryDestination, SharedDestination};
    use crate::logger::options::{LoggerOptions, TypeOptions};
    use crate::types::Failure;
    use serde_json::json;
    use std::io;

    struct BrokenDestination;

    impl Destination for BrokenDestination {
        fn name(&self) -> &str {
            "broken"
        }

        fn write_line(&self, _line: &Line) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn method_with(options: TypeOptions) -> (LogMethod, Arc<MemoryDestination>) {
        let capture = Arc::new(MemoryDestination::new());
        let options = options.destination(capture.clone());
        let config = TypeConfig::resolve(&options, &LoggerOptions::new()).unwrap();
        (LogMethod::new("info", config), capture)
    }

    #[test]
    fn test_logs_badge_and_label() {
        let (method, capture) = method_with(TypeOptions::new().badge("b-7f3a").label("l-91cc"));
        method.log("");

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("b-7f3a"));
        assert!(lines[0].contains("l-91cc"));
    }

    #[test]
    fn test_logs_object() {
        let (method, capture) = method_with(TypeOptions::new());
        let value = json!({ "test": "6c1b" });
        method.log(value.clone());

        assert!(capture.lines()[0].contains(&crate::format::format(&value, &[])));
    }

    #[test]
    fn test_error_without_stack_is_one_line() {
        let (method, capture) = method_with(TypeOptions::new().stack(false));
        method.log(Failure::new("e-1").with_stack("Error: e-1\n at a\n at b"));

        assert_eq!(capture.lines(), ["ℹ  info  e-1 \n"]);
    }

    #[test]
    fn test_error_with_stack_line_count() {
        let (method, capture) = method_with(TypeOptions::new());
        method.log(Failure::new("e-1").with_stack("Error: e-1\n at a\n at b"));

        assert_eq!(capture.len(), 3);
    }

    #[test]
    fn test_error_with_cause_line_count() {
        let (method, capture) = method_with(TypeOptions::new());
        let failure = Failure::new("root")
            .with_stack("Error: root\n at r1\n at r2")
            .with_cause(Failure::new("cause").with_stack("Error: cause\n at c1"));
        method.log(failure);

        // root (1 + 2 stack) + separator + cause (1 + 1 stack)
        assert_eq!(capture.len(), 6);
        let lines = capture.lines();
        assert_eq!(lines[3], " \n");
        assert_eq!(lines[4], "  cause \n");
        assert_eq!(lines[5], "    at c1 \n");
    }

    #[test]
    fn test_complex_error_without_stack() {
        let (method, capture) = method_with(TypeOptions::new().stack(false));
        let failure = Failure::aggregate(
            "m2",
            vec![
                Failure::new("m0").with_cause(Failure::new("m1")),
                Failure::new("m4"),
            ],
        )
        .with_cause(Failure::new("m3"));
        method.log(failure);

        // own + cause + 2 components + the first component's cause
        let lines = capture.lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines, ["ℹ  info  m2 \n", "  m3 \n", "  m0 \n", "  m1 \n", "  m4 \n"]);
    }

    #[test]
    fn test_complex_error_with_stack() {
        let (method, capture) = method_with(TypeOptions::new());
        let failure = Failure::aggregate(
            "m2",
            vec![Failure::new("m0")
                .with_stack("Error: m0\n at a0")
                .with_cause(Failure::new("m1").with_stack("Error: m1\n at a1"))],
        )
        .with_stack("Error: m2\n at a2")
        .with_cause(Failure::new("m3").with_stack("Error: m3\n at a3"));
        method.log(failure);

        // four blocks of two lines each, three separators
        assert_eq!(capture.len(), 11);
        for message in ["m0", "m1", "m2", "m3"] {
            assert!(capture.lines().iter().any(|line| line.contains(message)));
        }
    }

    #[test]
    fn test_substitutions_ignored_for_failures() {
        let (method, capture) = method_with(TypeOptions::new().stack(false));
        method.log(Message::from(Failure::new("%s")).with_args(vec![json!("x")]));

        assert_eq!(capture.lines(), ["ℹ  info  %s \n"]);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let (method, capture) = method_with(TypeOptions::new());
        let failure = Failure::new("root").with_cause(Failure::new("cause"));
        method.log(failure.clone());
        let first = capture.lines();
        capture.clear();
        method.log(failure);

        assert_eq!(first, capture.lines());
    }

    #[test]
    fn test_every_destination_receives_lines() {
        let first = Arc::new(MemoryDestination::new());
        let second = Arc::new(MemoryDestination::new());
        let options = TypeOptions::new().destination(first.clone()).destination(second.clone());
        let config = TypeConfig::resolve(&options, &LoggerOptions::new()).unwrap();
        let method = LogMethod::new("info", config);

        method.log(Failure::new("a").with_cause(Failure::new("b")));

        assert_eq!(first.len(), 3);
        assert_eq!(first.lines(), second.lines());
    }

    #[test]
    fn test_try_log_reports_failure_and_keeps_writing() {
        let capture = Arc::new(MemoryDestination::new());
        let broken: SharedDestination = Arc::new(BrokenDestination);
        let options = TypeOptions::new().destination(broken).destination(capture.clone());
        let config = TypeConfig::resolve(&options, &LoggerOptions::new()).unwrap();
        let method = LogMethod::new("info", config);

        let err = method.try_log(Failure::new("a").with_cause(Failure::new("b"))).unwrap_err();
        assert!(matches!(err, LogError::Destination { ref name, .. } if name == "broken"));
        assert_eq!(capture.len(), 3);

        // log() swallows the same failure
        method.log("still fine");
        assert_eq!(capture.len(), 4);
    }

    #[test]
    fn test_logf_macro() {
        let (method, capture) = method_with(TypeOptions::new());
        crate::logf!(method, "%s=%d", "retries", 3);
        crate::logf!(method, "plain");

        assert_eq!(capture.lines(), ["ℹ  info  retries=3 \n", "ℹ  info  plain \n"]);
    }
}
