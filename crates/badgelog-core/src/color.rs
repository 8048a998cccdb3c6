//! Color name resolution

use std::collections::HashMap;
use std::str::FromStr;

use colored::Color;
use once_cell::sync::Lazy;

use crate::error::{LogError, LogResult};

/// Names accepted in addition to the ones `colored` parses itself
static ALIASES: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("gray", Color::BrightBlack);
    map.insert("grey", Color::BrightBlack);
    map.insert("blackbright", Color::BrightBlack);
    map.insert("redbright", Color::BrightRed);
    map.insert("greenbright", Color::BrightGreen);
    map.insert("yellowbright", Color::BrightYellow);
    map.insert("bluebright", Color::BrightBlue);
    map.insert("magentabright", Color::BrightMagenta);
    map.insert("cyanbright", Color::BrightCyan);
    map.insert("whitebright", Color::BrightWhite);
    map
});

/// Resolve a color name such as `"blue"`, `"bright red"` or `"gray"`
///
/// Lookup is case-insensitive and treats `_` like a space. Unknown names are
/// rejected so misconfiguration shows up when the logger is built.
pub fn resolve_color(name: &str) -> LogResult<Color> {
    let normalized = name.trim().to_lowercase().replace('_', " ");

    if let Some(color) = ALIASES.get(normalized.as_str()) {
        return Ok(*color);
    }

    Color::from_str(&normalized).map_err(|_| LogError::UnknownColor(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_colors() {
        assert_eq!(resolve_color("blue").unwrap(), Color::Blue);
        assert_eq!(resolve_color("Red").unwrap(), Color::Red);
        assert_eq!(resolve_color("bright_green").unwrap(), Color::BrightGreen);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(resolve_color("gray").unwrap(), Color::BrightBlack);
        assert_eq!(resolve_color("redBright").unwrap(), Color::BrightRed);
    }

    #[test]
    fn test_unknown_color() {
        let err = resolve_color("chartreuse").unwrap_err();
        assert!(matches!(err, LogError::UnknownColor(name) if name == "chartreuse"));
    }
}
