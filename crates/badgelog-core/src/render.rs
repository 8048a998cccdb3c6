//! Line rendering for flattened messages
//!
//! The first line of the first block carries the colored `badge  label  `
//! prefix. Every other line of the first block is indented by the
//! continuation prefix and muted. Later blocks (causes, aggregate components)
//! start with a muted continuation line and indent their own extra lines
//! twice; when stacks are shown, each of them is preceded by a blank line.

use colored::{Color, Colorize};

use crate::flatten::flatten;
use crate::types::Message;

/// Gap between badge, label and text, and the continuation indent
pub const SPACING: &str = "  ";

/// How a line is decorated on color-capable destinations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    /// Prefix painted in the type's color, text as-is
    Lead(Color),
    /// Plain prefix, text in gray
    Muted,
    /// Separator between stacked blocks
    Blank,
}

/// One physical output line
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    prefix: String,
    text: String,
    style: LineStyle,
}

impl Line {
    fn lead(prefix: &str, text: String, color: Color) -> Self {
        Self {
            prefix: prefix.to_string(),
            text,
            style: LineStyle::Lead(color),
        }
    }

    fn muted(prefix: String, text: String) -> Self {
        Self {
            prefix,
            text,
            style: LineStyle::Muted,
        }
    }

    fn blank() -> Self {
        Self {
            prefix: String::new(),
            text: String::new(),
            style: LineStyle::Blank,
        }
    }

    /// Undecorated prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Undecorated text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// How the line is decorated
    pub fn style(&self) -> LineStyle {
        self.style
    }

    /// The line with color codes, as written to terminal streams
    ///
    /// Whether codes are emitted follows `colored`'s global control
    /// (`NO_COLOR`, `CLICOLOR`, `colored::control::set_override`).
    pub fn decorated(&self) -> String {
        match self.style {
            LineStyle::Lead(color) => format!("{}{}", self.prefix.color(color), self.text),
            LineStyle::Muted => format!("{}{}", self.prefix, self.text.bright_black()),
            LineStyle::Blank => String::new(),
        }
    }

    /// The line without color codes
    pub fn plain(&self) -> String {
        format!("{}{}", self.prefix, self.text)
    }

    /// Frame a rendered line for writing: one trailing space, then a newline
    pub fn terminate(rendered: &str) -> String {
        format!("{} \n", rendered)
    }
}

/// Renders messages for one log type
///
/// The lead prefix is built once; rendering itself holds no state.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderer {
    lead_prefix: String,
    color: Color,
    include_stack: bool,
}

impl Renderer {
    /// Build a renderer
    ///
    /// `indention` is the minimum width of the label column, in characters.
    pub fn new(badge: &str, label: &str, indention: usize, color: Color, include_stack: bool) -> Self {
        let padding = indention.saturating_sub(label.chars().count());
        let lead_prefix = format!("{badge}{SPACING}{label}{}{SPACING}", " ".repeat(padding));

        Self {
            lead_prefix,
            color,
            include_stack,
        }
    }

    /// The undecorated `badge  label  ` prefix
    pub fn lead_prefix(&self) -> &str {
        &self.lead_prefix
    }

    /// Whether failure stack lines and block separators are rendered
    pub fn include_stack(&self) -> bool {
        self.include_stack
    }

    /// Render a message into physical lines
    pub fn render(&self, message: &Message) -> Vec<Line> {
        let mut lines = Vec::new();

        for (index, block) in flatten(message).iter().enumerate() {
            let mut block_lines = block.lines(self.include_stack).into_iter();
            let first = block_lines.next().unwrap_or_default();

            if index == 0 {
                lines.push(Line::lead(&self.lead_prefix, first, self.color));
                lines.extend(block_lines.map(|line| Line::muted(SPACING.to_string(), line)));
            } else {
                if self.include_stack {
                    lines.push(Line::blank());
                }
                lines.push(Line::muted(SPACING.to_string(), first));
                lines.extend(block_lines.map(|line| Line::muted(SPACING.repeat(2), line)));
            }
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Failure;
    use serde_json::json;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::plain).collect()
    }

    #[test]
    fn test_lead_prefix_padding() {
        let renderer = Renderer::new("ℹ", "info", 7, Color::Blue, true);
        assert_eq!(renderer.lead_prefix(), "ℹ  info     ");

        let unpadded = Renderer::new("✖", "error", 0, Color::Red, true);
        assert_eq!(unpadded.lead_prefix(), "✖  error  ");

        assert!(renderer.include_stack());
        assert!(!Renderer::new("✖", "error", 0, Color::Red, false).include_stack());
    }

    #[test]
    fn test_plain_message() {
        let renderer = Renderer::new("ℹ", "info", 0, Color::Blue, true);
        let lines = renderer.render(&Message::format("hello %s", vec![json!("world")]));

        assert_eq!(plain(&lines), ["ℹ  info  hello world"]);
        assert_eq!(lines[0].style(), LineStyle::Lead(Color::Blue));
    }

    #[test]
    fn test_failure_with_stack() {
        let renderer = Renderer::new("✖", "error", 0, Color::Red, true);
        let failure = Failure::new("boom").with_stack("Error: boom\n    at a\n    at b");
        let lines = renderer.render(&failure.into());

        assert_eq!(plain(&lines), ["✖  error  boom", "  at a", "  at b"]);
        assert_eq!(lines[1].style(), LineStyle::Muted);
    }

    #[test]
    fn test_cause_blocks_with_stack() {
        let renderer = Renderer::new("✖", "error", 0, Color::Red, true);
        let failure = Failure::new("root")
            .with_stack("Error: root\n at r")
            .with_cause(Failure::new("cause").with_stack("Error: cause\n at c1\n at c2"));
        let lines = renderer.render(&failure.into());

        assert_eq!(
            plain(&lines),
            ["✖  error  root", "  at r", "", "  cause", "    at c1", "    at c2"]
        );
        assert_eq!(lines[2].style(), LineStyle::Blank);
    }

    #[test]
    fn test_cause_blocks_without_stack() {
        let renderer = Renderer::new("✖", "error", 0, Color::Red, false);
        let failure = Failure::new("root")
            .with_stack("Error: root\n at r")
            .with_cause(Failure::new("cause").with_stack("Error: cause\n at c"));
        let lines = renderer.render(&failure.into());

        assert_eq!(plain(&lines), ["✖  error  root", "  cause"]);
    }

    #[test]
    fn test_terminate() {
        assert_eq!(Line::terminate("abc"), "abc \n");
        assert_eq!(Line::terminate(""), " \n");
    }

    #[test]
    fn test_blank_line_has_no_decoration() {
        let renderer = Renderer::new("!", "warn", 0, Color::Yellow, true);
        let failure = Failure::new("a").with_cause(Failure::new("b"));
        let lines = renderer.render(&failure.into());

        assert_eq!(lines[1].decorated(), "");
    }

    #[test]
    fn test_render_is_repeatable() {
        let renderer = Renderer::new("ℹ", "info", 4, Color::Blue, true);
        let message = Message::from(Failure::aggregate("agg", vec![Failure::new("one")]));

        assert_eq!(renderer.render(&message), renderer.render(&message));
    }
}
