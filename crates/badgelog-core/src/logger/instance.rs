//! Logger instances and the factory that builds them

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::method::LogMethod;
use super::options::{LoggerOptions, TypeConfig, TypeOptions};
use crate::error::LogResult;

/// An entry of the types map handed to [`create_logger`]
#[derive(Debug, Clone)]
pub enum TypeEntry {
    /// A type to build a method for
    Config(TypeOptions),
    /// An already built logger, embedded as-is under the entry's key
    Logger(Logger),
}

impl From<TypeOptions> for TypeEntry {
    fn from(options: TypeOptions) -> Self {
        TypeEntry::Config(options)
    }
}

impl From<Logger> for TypeEntry {
    fn from(logger: Logger) -> Self {
        TypeEntry::Logger(logger)
    }
}

/// An entry of a built logger
#[derive(Debug, Clone)]
pub enum Entry {
    Method(LogMethod),
    Nested(Logger),
}

impl Entry {
    pub fn as_method(&self) -> Option<&LogMethod> {
        match self {
            Entry::Method(method) => Some(method),
            Entry::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Logger> {
        match self {
            Entry::Method(_) => None,
            Entry::Nested(logger) => Some(logger),
        }
    }
}

/// A built logger: type names mapped to log methods or nested loggers
///
/// Immutable once built. Cloning is cheap and clones share their methods, so
/// a logger nested in another behaves exactly like the original.
#[derive(Clone, Default)]
pub struct Logger {
    entries: Arc<IndexMap<String, Entry>>,
}

impl Logger {
    /// Look up an entry by type name
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Look up a log method by type name
    pub fn method(&self, name: &str) -> Option<&LogMethod> {
        self.get(name).and_then(Entry::as_method)
    }

    /// Look up a nested logger by key
    pub fn nested(&self, name: &str) -> Option<&Logger> {
        self.get(name).and_then(Entry::as_nested)
    }

    /// Look up a method through nested loggers, e.g. `"db.warn"`
    pub fn method_path(&self, path: &str) -> Option<&LogMethod> {
        let mut segments = path.split('.');
        let last = segments.next_back()?;
        let mut logger = self;
        for segment in segments {
            logger = logger.nested(segment)?;
        }
        logger.method(last)
    }

    /// Entry names, in the order they were given
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries, in the order they were given
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

/// Build a logger from a types map and global options
///
/// Nested loggers are copied through unchanged; every other entry is resolved
/// against the built-in defaults and turned into a [`LogMethod`]. Fails on the
/// first misconfigured type.
///
/// # Example
///
/// ```
/// use badgelog_core::{create_logger, LoggerOptions, TypeEntry, TypeOptions};
///
/// let inner = create_logger([("info", TypeEntry::from(TypeOptions::new()))], LoggerOptions::new()).unwrap();
/// let logger = create_logger(
///     [
///         ("warn", TypeOptions::new().color("yellow").badge("⚠").label("warn").into()),
///         ("db", TypeEntry::from(inner)),
///     ],
///     LoggerOptions::new().with_indention(5),
/// )
/// .unwrap();
///
/// assert!(logger.method("warn").is_some());
/// assert!(logger.method_path("db.info").is_some());
/// ```
pub fn create_logger<I, K>(types: I, options: LoggerOptions) -> LogResult<Logger>
where
    I: IntoIterator<Item = (K, TypeEntry)>,
    K: Into<String>,
{
    let mut entries = IndexMap::new();

    for (name, entry) in types {
        let name = name.into();
        let entry = match entry {
            TypeEntry::Logger(logger) => Entry::Nested(logger),
            TypeEntry::Config(type_options) => {
                let config = TypeConfig::resolve(&type_options, &options)?;
                Entry::Method(LogMethod::new(name.clone(), config))
            }
        };
        // a replaced entry keeps its first position
        entries.insert(name, entry);
    }

    crate::diag_debug!("built logger with {} entries", entries.len());

    Ok(Logger {
        entries: Arc::new(entries),
    })
}

/// Fluent construction of a [`Logger`]
///
/// # Example
///
/// ```
/// use badgelog_core::{LoggerBuilder, TypeOptions};
///
/// let logger = LoggerBuilder::new()
///     .indention(7)
///     .with_type("success", TypeOptions::new().color("green").badge("✔").label("success"))
///     .with_type("error", TypeOptions::new().color("red").badge("✖").label("error"))
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.names().collect::<Vec<_>>(), ["success", "error"]);
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    options: LoggerOptions,
    types: Vec<(String, TypeEntry)>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the global options
    pub fn options(mut self, options: LoggerOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the label column width
    pub fn indention(mut self, indention: usize) -> Self {
        self.options.indention = indention;
        self
    }

    /// Add any entry
    pub fn entry(mut self, name: impl Into<String>, entry: impl Into<TypeEntry>) -> Self {
        self.types.push((name.into(), entry.into()));
        self
    }

    /// Add a log type
    pub fn with_type(self, name: impl Into<String>, options: TypeOptions) -> Self {
        self.entry(name, options)
    }

    /// Embed an already built logger under `name`
    pub fn nest(self, name: impl Into<String>, logger: Logger) -> Self {
        self.entry(name, logger)
    }

    pub fn build(self) -> LogResult<Logger> {
        create_logger(self.types, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::MemoryDestination;
    use crate::error::LogError;
    use crate::types::Failure;

    #[test]
    fn test_returns_logger() {
        let logger = LoggerBuilder::new().with_type("info", TypeOptions::new()).build().unwrap();

        assert_eq!(logger.len(), 1);
        assert_eq!(logger.method("info").map(LogMethod::name), Some("info"));
        assert!(logger.nested("info").is_none());
    }

    #[test]
    fn test_returns_nested_logger() {
        let inner = LoggerBuilder::new().with_type("info", TypeOptions::new()).build().unwrap();
        let logger = LoggerBuilder::new().nest("instance", inner).build().unwrap();

        assert!(logger.method("instance").is_none());
        assert!(logger.nested("instance").and_then(|l| l.method("info")).is_some());
        assert!(logger.method_path("instance.info").is_some());
        assert!(logger.method_path("instance.missing").is_none());
        assert!(logger.method_path("missing.info").is_none());
    }

    #[test]
    fn test_nested_method_behaves_like_inner() {
        let capture = Arc::new(MemoryDestination::new());
        let inner = LoggerBuilder::new()
            .indention(6)
            .with_type("info", TypeOptions::new().destination(capture.clone()))
            .build()
            .unwrap();
        let outer = LoggerBuilder::new()
            .indention(0)
            .nest("outer", inner.clone())
            .build()
            .unwrap();

        let message = Failure::new("root").with_cause(Failure::new("cause"));
        inner.method("info").unwrap().log(message.clone());
        let direct = capture.lines();
        capture.clear();
        outer.method_path("outer.info").unwrap().log(message);

        assert_eq!(direct, capture.lines());
        assert!(direct[0].starts_with("ℹ  info    "));
    }

    #[test]
    fn test_keys_match_input() {
        let inner = LoggerBuilder::new().build().unwrap();
        let logger = create_logger(
            [
                ("b", TypeEntry::from(TypeOptions::new())),
                ("a", TypeEntry::from(inner)),
                ("c", TypeEntry::from(TypeOptions::new().label("c"))),
            ],
            LoggerOptions::new(),
        )
        .unwrap();

        assert_eq!(logger.names().collect::<Vec<_>>(), ["b", "a", "c"]);
        assert!(logger.contains("a"));
        assert!(!logger.contains("d"));
    }

    #[test]
    fn test_duplicate_name_replaces_in_place() {
        let logger = LoggerBuilder::new()
            .with_type("info", TypeOptions::new())
            .with_type("warn", TypeOptions::new())
            .with_type("info", TypeOptions::new().label("again"))
            .build()
            .unwrap();

        assert_eq!(logger.names().collect::<Vec<_>>(), ["info", "warn"]);
        assert_eq!(logger.len(), 2);
        assert_eq!(logger.method("info").unwrap().config().label(), "again");

        let labels: Vec<_> = logger
            .entries()
            .map(|(name, entry)| (name, entry.as_method().unwrap().config().label().to_string()))
            .collect();
        assert_eq!(labels, [("info", "again".to_string()), ("warn", "warn".to_string())]);
    }

    #[test]
    fn test_misconfigured_type_fails() {
        let err = LoggerBuilder::new()
            .with_type("info", TypeOptions::new())
            .with_type("bad", TypeOptions::new().color("ultraviolet"))
            .build()
            .unwrap_err();

        assert!(matches!(err, LogError::UnknownColor(name) if name == "ultraviolet"));
    }

    #[test]
    fn test_empty_logger() {
        let logger = create_logger(Vec::<(String, TypeEntry)>::new(), LoggerOptions::new()).unwrap();
        assert!(logger.is_empty());
        assert_eq!(format!("{:?}", logger), "{}");
    }
}
