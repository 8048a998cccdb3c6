//! Diagnostics log for the library itself
//!
//! Loggers built by this crate write to their own destinations; this module
//! records what the library cannot report through them (dropped write
//! failures, destination setup) to a file, for troubleshooting when output
//! goes missing.
//!
//! Off unless `BADGELOG_DEBUG` is `1` or `true`. `BADGELOG_LOG_LEVEL` sets the
//! minimum level (default `debug`), `BADGELOG_DEBUG_LOG` overrides the file
//! path (default `<temp dir>/badgelog-debug.log`).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::SystemTime;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

/// Diagnostic levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug = 0,
    Warn = 1,
}

impl Level {
    fn from_env(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "warn" | "warning" => Level::Warn,
            _ => Level::Debug,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Debug => write!(f, "DEBUG"),
            Level::Warn => write!(f, "WARN "),
        }
    }
}

struct DiagnosticsState {
    file: Option<File>,
    min_level: Level,
}

impl DiagnosticsState {
    fn from_env() -> Self {
        let enabled = std::env::var("BADGELOG_DEBUG")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        let min_level = std::env::var("BADGELOG_LOG_LEVEL")
            .map(|v| Level::from_env(&v))
            .unwrap_or(Level::Debug);

        let file = if enabled {
            OpenOptions::new().create(true).append(true).open(log_file_path()).ok()
        } else {
            None
        };

        Self { file, min_level }
    }

    fn write(&mut self, level: Level, module: &str, message: &str) {
        if level < self.min_level {
            return;
        }

        if let Some(ref mut file) = self.file {
            let _ = writeln!(file, "[{}] [{}] [{}] {}", timestamp(), level, module, message);
            let _ = file.flush();
        }
    }
}

static STATE: Lazy<Mutex<DiagnosticsState>> = Lazy::new(|| Mutex::new(DiagnosticsState::from_env()));

fn timestamp() -> String {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs();
            format!(
                "{:02}:{:02}:{:02}.{:03}",
                (secs % 86400) / 3600,
                (secs % 3600) / 60,
                secs % 60,
                d.subsec_millis()
            )
        })
        .unwrap_or_else(|_| "??:??:??.???".to_string())
}

/// Get the path of the diagnostics file
pub fn log_file_path() -> PathBuf {
    std::env::var_os("BADGELOG_DEBUG_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("badgelog-debug.log"))
}

/// Record a diagnostic
pub fn record(level: Level, module: &str, message: &str) {
    STATE.lock().write(level, module, message);
}

/// Record a debug diagnostic with automatic module name
#[macro_export]
macro_rules! diag_debug {
    ($($arg:tt)*) => {
        $crate::diagnostics::record($crate::diagnostics::Level::Debug, module_path!(), &format!($($arg)*))
    };
}

/// Record a warning diagnostic with automatic module name
#[macro_export]
macro_rules! diag_warn {
    ($($arg:tt)*) => {
        $crate::diagnostics::record($crate::diagnostics::Level::Warn, module_path!(), &format!($($arg)*))
    };
}
