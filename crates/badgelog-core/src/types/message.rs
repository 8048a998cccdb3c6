//! Message types accepted by log methods

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;

use serde_json::Value;

/// Maximum number of `Error::source()` links followed by [`Failure::from_error`]
pub const MAX_SOURCE_DEPTH: usize = 64;

/// An error capable of bundling an ordered collection of component errors
///
/// Aggregates are detected by this capability rather than by a concrete type,
/// so any error that exposes its components can be rendered as one.
///
/// # Example
///
/// ```
/// use std::error::Error;
/// use std::fmt;
/// use badgelog_core::{AggregateError, Failure};
///
/// #[derive(Debug)]
/// struct Step(&'static str);
///
/// impl fmt::Display for Step {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "step {} failed", self.0)
///     }
/// }
///
/// impl Error for Step {}
///
/// #[derive(Debug)]
/// struct Batch(Vec<Step>);
///
/// impl fmt::Display for Batch {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{} steps failed", self.0.len())
///     }
/// }
///
/// impl Error for Batch {}
///
/// impl AggregateError for Batch {
///     fn errors(&self) -> Vec<&(dyn Error + 'static)> {
///         self.0.iter().map(|e| e as &(dyn Error + 'static)).collect()
///     }
/// }
///
/// let failure = Failure::from_aggregate(&Batch(vec![Step("a"), Step("b")]));
/// assert!(failure.is_aggregate());
/// assert_eq!(failure.errors().len(), 2);
/// ```
pub trait AggregateError: Error {
    /// The component errors, in order
    fn errors(&self) -> Vec<&(dyn Error + 'static)>;
}

/// An error value prepared for rendering
///
/// Holds the error's own message, its parsed stack-trace lines, an optional
/// cause and, for aggregates, the component failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    message: String,
    stack: Vec<String>,
    cause: Option<Box<Failure>>,
    errors: Vec<Failure>,
    aggregate: bool,
}

impl Failure {
    /// Create a failure with a message and no stack, cause or components
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: Vec::new(),
            cause: None,
            errors: Vec::new(),
            aggregate: false,
        }
    }

    /// Create an aggregate failure bundling the given component failures
    pub fn aggregate(message: impl Into<String>, errors: Vec<Failure>) -> Self {
        Self {
            errors,
            aggregate: true,
            ..Self::new(message)
        }
    }

    /// Create a failure carrying a backtrace of the current call site
    ///
    /// Whether frames are captured follows `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE`.
    pub fn capture(message: impl Into<String>) -> Self {
        Self::new(message).with_backtrace(&Backtrace::capture())
    }

    /// Set the underlying cause
    pub fn with_cause(mut self, cause: Failure) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Attach a raw stack trace
    ///
    /// The first line is the `Kind: message` header and is dropped; every
    /// remaining line is trimmed. An empty string attaches nothing.
    pub fn with_stack(mut self, raw: &str) -> Self {
        self.stack = if raw.is_empty() {
            Vec::new()
        } else {
            raw.split('\n').skip(1).map(|line| line.trim().to_string()).collect()
        };
        self
    }

    /// Attach already-parsed stack lines (trimmed, no header)
    pub fn with_stack_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stack = lines.into_iter().map(|line| line.into().trim().to_string()).collect();
        self
    }

    /// Attach a backtrace, if it was actually captured
    pub fn with_backtrace(mut self, backtrace: &Backtrace) -> Self {
        if backtrace.status() == BacktraceStatus::Captured {
            self.stack = backtrace
                .to_string()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
        }
        self
    }

    /// Convert a standard error, following its `source()` chain as causes
    ///
    /// At most [`MAX_SOURCE_DEPTH`] links are followed. A link that already is
    /// a [`Failure`] is kept whole, with its stack, cause and components.
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut tail: Option<Failure> = None;
        let mut current = Some(err);
        while let Some(link) = current {
            if let Some(failure) = link.downcast_ref::<Failure>() {
                tail = Some(failure.clone());
                break;
            }
            if chain.len() > MAX_SOURCE_DEPTH {
                break;
            }
            chain.push(link.to_string());
            current = link.source();
        }

        let mut failure = tail;
        for message in chain.into_iter().rev() {
            let mut next = Failure::new(message);
            next.cause = failure.map(Box::new);
            failure = Some(next);
        }
        failure.unwrap_or_else(|| Failure::new(err.to_string()))
    }

    /// Convert an aggregate error: its source becomes the cause and each
    /// component is converted with [`Failure::from_error`]
    pub fn from_aggregate<E: AggregateError + ?Sized>(err: &E) -> Self {
        let errors = err.errors().into_iter().map(Failure::from_error).collect();
        let mut failure = Failure::aggregate(err.to_string(), errors);
        failure.cause = err.source().map(|source| Box::new(Failure::from_error(source)));
        failure
    }

    /// The failure's own message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Parsed stack lines, header excluded
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    /// The underlying cause, if any
    pub fn cause(&self) -> Option<&Failure> {
        self.cause.as_deref()
    }

    /// Component failures (empty unless this is an aggregate)
    pub fn errors(&self) -> &[Failure] {
        &self.errors
    }

    /// Whether this failure bundles component failures
    pub fn is_aggregate(&self) -> bool {
        self.aggregate
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

/// The first argument of a log call
///
/// Either a plain value with printf-style substitution arguments, or a
/// failure to render with its cause chain and components.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Any value, formatted together with its substitution arguments
    Plain { value: Value, args: Vec<Value> },
    /// An error, rendered as one block per failure in the chain
    Failure(Failure),
}

impl Message {
    /// A plain value without substitution arguments
    pub fn plain(value: impl Into<Value>) -> Self {
        Message::Plain {
            value: value.into(),
            args: Vec::new(),
        }
    }

    /// A printf-style template with its substitution arguments
    pub fn format(template: impl Into<String>, args: Vec<Value>) -> Self {
        Message::Plain {
            value: Value::String(template.into()),
            args,
        }
    }

    /// A standard error, converted with [`Failure::from_error`]
    pub fn error(err: &(dyn Error + 'static)) -> Self {
        Message::Failure(Failure::from_error(err))
    }

    /// Replace the substitution arguments (ignored for failures)
    pub fn with_args(self, args: Vec<Value>) -> Self {
        match self {
            Message::Plain { value, .. } => Message::Plain { value, args },
            failure => failure,
        }
    }

    /// Whether this message renders as a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Message::Failure(_))
    }
}

impl From<Failure> for Message {
    fn from(failure: Failure) -> Self {
        Message::Failure(failure)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        Message::plain(value)
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::plain(s)
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::plain(s)
    }
}

impl From<bool> for Message {
    fn from(b: bool) -> Self {
        Message::plain(b)
    }
}

impl From<i64> for Message {
    fn from(n: i64) -> Self {
        Message::plain(n)
    }
}

impl From<u64> for Message {
    fn from(n: u64) -> Self {
        Message::plain(n)
    }
}

impl From<f64> for Message {
    fn from(n: f64) -> Self {
        Message::plain(n)
    }
}
