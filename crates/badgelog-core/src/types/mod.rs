//! Core types for badgelog

mod message;

pub use message::{AggregateError, Failure, Message, MAX_SOURCE_DEPTH};
