//! Logger configuration files

mod file;

pub use file::ConfigFile;
