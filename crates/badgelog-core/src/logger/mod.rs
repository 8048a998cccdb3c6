//! Logger factory
//!
//! Turns a map of type names to options (or already built loggers) into a
//! [`Logger`] whose entries are callable [`LogMethod`]s.

mod options;
mod method;
mod instance;

pub use options::{
    LoggerOptions, TypeConfig, TypeOptions, DEFAULT_BADGE, DEFAULT_COLOR, DEFAULT_LABEL, DEFAULT_STACK,
};
pub use method::LogMethod;
pub use instance::{create_logger, Entry, Logger, LoggerBuilder, TypeEntry};
