//! Message flattening
//!
//! A message is decomposed into an ordered list of blocks: the message (or
//! root failure) first, then the root's cause chain, then, for aggregates,
//! every component. Each cause and component is itself flattened depth-first,
//! so nested causes and aggregates come out in reading order.

use serde_json::Value;

use crate::format::format;
use crate::types::{Failure, Message};

/// One printable unit of a flattened message
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Block<'a> {
    /// The original non-error message with its substitution arguments
    Plain { value: &'a Value, args: &'a [Value] },
    /// One failure of the chain
    Failure(&'a Failure),
}

impl<'a> Block<'a> {
    /// The lines of this block
    ///
    /// A plain block is always a single entry, even when the formatted text
    /// contains newlines. A failure yields its message, followed by its stack
    /// lines when `include_stack` is set.
    pub fn lines(&self, include_stack: bool) -> Vec<String> {
        match self {
            Block::Plain { value, args } => vec![format(value, args)],
            Block::Failure(failure) => {
                let mut lines = vec![failure.message().to_string()];
                if include_stack {
                    lines.extend(failure.stack().iter().cloned());
                }
                lines
            }
        }
    }
}

/// Flatten a message into its blocks
pub fn flatten(message: &Message) -> Vec<Block<'_>> {
    match message {
        Message::Plain { value, args } => vec![Block::Plain { value, args }],
        Message::Failure(failure) => {
            let mut blocks = Vec::new();
            flatten_failure(failure, &mut blocks);
            blocks
        }
    }
}

fn flatten_failure<'a>(failure: &'a Failure, blocks: &mut Vec<Block<'a>>) {
    blocks.push(Block::Failure(failure));

    if let Some(cause) = failure.cause() {
        flatten_failure(cause, blocks);
    }

    if failure.is_aggregate() {
        for component in failure.errors() {
            flatten_failure(component, blocks);
        }
    }
}
