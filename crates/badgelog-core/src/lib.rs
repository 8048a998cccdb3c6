//! badgelog core
//!
//! Badge-and-label logging for terminals and files. A logger is built from a
//! map of type names (`info`, `warn`, `error`, ...) to options; each type
//! becomes a [`LogMethod`] that prints plain values, printf-style templates,
//! or failures with their whole cause chain and aggregated sub-errors.
//!
//! ```text
//! ✖  error  request failed
//!   at handler (src/api.rs:42)
//!
//!   connection reset
//!     at socket (src/net.rs:7)
//! ```
//!
//! ## Building a logger
//!
//! ```rust
//! use badgelog_core::{Failure, LoggerBuilder, StreamTarget, TypeOptions};
//!
//! let logger = LoggerBuilder::new()
//!     .indention(7)
//!     .with_type("success", TypeOptions::new().color("green").badge("✔").label("success"))
//!     .with_type(
//!         "error",
//!         TypeOptions::new().color("red").badge("✖").label("error").stream(StreamTarget::Stderr),
//!     )
//!     .build()?;
//!
//! logger.method("success").unwrap().log("deployed");
//! logger.method("error").unwrap().log(
//!     Failure::new("request failed").with_cause(Failure::new("connection reset")),
//! );
//! # Ok::<(), badgelog_core::LogError>(())
//! ```
//!
//! Loggers nest: an already built logger can be placed under a key of another
//! one and its methods are reached with [`Logger::method_path`].

pub mod types;
pub mod error;
pub mod format;
pub mod flatten;
pub mod color;
pub mod render;
pub mod destination;
pub mod logger;
pub mod config;
pub mod diagnostics;

// Used by `logf!`
pub use serde_json;

// Re-export commonly used types
pub use types::{AggregateError, Failure, Message};

pub use error::{LogError, LogResult};

pub use flatten::{flatten, Block};

pub use render::{Line, LineStyle, Renderer};

pub use destination::{
    Destination, SharedDestination,
    StreamDestination, StreamTarget, FileDestination, MemoryDestination,
};

pub use logger::{
    create_logger, Entry, LogMethod, Logger, LoggerBuilder, LoggerOptions,
    TypeConfig, TypeEntry, TypeOptions,
};

pub use config::ConfigFile;
