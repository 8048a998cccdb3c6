//! Logger and per-type options, and their resolution

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use colored::Color;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::color::resolve_color;
use crate::destination::{FileDestination, SharedDestination, StreamTarget};
use crate::error::LogResult;
use crate::render::Renderer;

pub const DEFAULT_COLOR: &str = "blue";
pub const DEFAULT_BADGE: &str = "ℹ";
pub const DEFAULT_LABEL: &str = "info";
pub const DEFAULT_STACK: bool = true;

static STDOUT: Lazy<SharedDestination> = Lazy::new(|| Arc::new(StreamTarget::Stdout.destination()));
static STDERR: Lazy<SharedDestination> = Lazy::new(|| Arc::new(StreamTarget::Stderr.destination()));

fn shared_stream(target: StreamTarget) -> SharedDestination {
    match target {
        StreamTarget::Stdout => STDOUT.clone(),
        StreamTarget::Stderr => STDERR.clone(),
    }
}

/// Options shared by every type of a logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoggerOptions {
    /// Minimum width of the label column, in characters
    #[serde(default)]
    pub indention: usize,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indention(mut self, indention: usize) -> Self {
        self.indention = indention;
        self
    }
}

/// Caller overrides for one log type
///
/// Every field is optional; unset fields fall back to the built-in defaults
/// (`blue`, `ℹ`, `info`, stack shown, standard output). Destinations are
/// taken from the first of `destinations`, `file` and `streams` that is set.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TypeOptions {
    /// Color name for the badge and label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Show stack lines and separate chained blocks with blank lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<bool>,

    /// Standard streams to write to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streams: Option<Vec<StreamTarget>>,

    /// A file to append undecorated lines to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Programmatic destinations
    #[serde(skip)]
    pub destinations: Option<Vec<SharedDestination>>,
}

impl TypeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn stack(mut self, stack: bool) -> Self {
        self.stack = Some(stack);
        self
    }

    /// Add a standard stream
    pub fn stream(mut self, target: StreamTarget) -> Self {
        self.streams.get_or_insert_with(Vec::new).push(target);
        self
    }

    /// Append to a file instead of writing to streams
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Add a programmatic destination
    pub fn destination(mut self, destination: SharedDestination) -> Self {
        self.destinations.get_or_insert_with(Vec::new).push(destination);
        self
    }
}

impl fmt::Debug for TypeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeOptions")
            .field("color", &self.color)
            .field("badge", &self.badge)
            .field("label", &self.label)
            .field("stack", &self.stack)
            .field("streams", &self.streams)
            .field("file", &self.file)
            .field(
                "destinations",
                &self.destinations.as_ref().map(|d| format!("[{} destinations]", d.len())),
            )
            .finish()
    }
}

/// Fully resolved, immutable configuration of one log type
#[derive(Clone)]
pub struct TypeConfig {
    color_name: String,
    color: Color,
    badge: String,
    label: String,
    include_stack: bool,
    indention: usize,
    destinations: Vec<SharedDestination>,
}

impl TypeConfig {
    /// Layer `options` over the built-in defaults
    ///
    /// Fails on unknown color names and on files that cannot be opened.
    pub fn resolve(options: &TypeOptions, global: &LoggerOptions) -> LogResult<Self> {
        let color_name = options.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_string());
        let color = resolve_color(&color_name)?;

        let destinations = if let Some(destinations) = &options.destinations {
            destinations.clone()
        } else if let Some(path) = &options.file {
            vec![Arc::new(FileDestination::open(path)?) as SharedDestination]
        } else if let Some(streams) = &options.streams {
            streams.iter().copied().map(shared_stream).collect()
        } else {
            vec![shared_stream(StreamTarget::Stdout)]
        };

        Ok(Self {
            color_name,
            color,
            badge: options.badge.clone().unwrap_or_else(|| DEFAULT_BADGE.to_string()),
            label: options.label.clone().unwrap_or_else(|| DEFAULT_LABEL.to_string()),
            include_stack: options.stack.unwrap_or(DEFAULT_STACK),
            indention: global.indention,
            destinations,
        })
    }

    /// The configured color name, as given
    pub fn color_name(&self) -> &str {
        &self.color_name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn badge(&self) -> &str {
        &self.badge
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn include_stack(&self) -> bool {
        self.include_stack
    }

    pub fn indention(&self) -> usize {
        self.indention
    }

    pub fn destinations(&self) -> &[SharedDestination] {
        &self.destinations
    }

    /// Build the renderer for this type
    pub fn renderer(&self) -> Renderer {
        Renderer::new(&self.badge, &self.label, self.indention, self.color, self.include_stack)
    }
}

impl fmt::Debug for TypeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let destinations: Vec<&str> = self.destinations.iter().map(|d| d.name()).collect();
        f.debug_struct("TypeConfig")
            .field("color", &self.color_name)
            .field("badge", &self.badge)
            .field("label", &self.label)
            .field("include_stack", &self.include_stack)
            .field("indention", &self.indention)
            .field("destinations", &destinations)
            .finish()
    }
}
