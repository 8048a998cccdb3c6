//! Destinations that rendered lines are written to
//!
//! This module provides:
//! - `Destination` trait for implementing custom sinks
//! - Built-in implementations: `StreamDestination` (stdout, stderr, any writer),
//!   `FileDestination` (append-only, uncolored) and `MemoryDestination` (capture)

mod traits;
mod stream;
mod file;
mod memory;

pub use traits::{Destination, SharedDestination};
pub use stream::{StreamDestination, StreamTarget};
pub use file::FileDestination;
pub use memory::MemoryDestination;
