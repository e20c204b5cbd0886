//! Unified diff rendering for check mode.
//!
//! Styling is a pure function over diff lines: [`DiffStyle`] carries the one
//! color decision, made once at invocation start, so output destined for a
//! pipe or a test harness stays free of escape codes.

use std::io::IsTerminal;
use std::path::Path;

use similar::{ChangeTag, TextDiff};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Whether diff output gets ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffStyle {
    colored: bool,
}

impl DiffStyle {
    /// Color unless disabled by flag or stderr is not a terminal.
    pub fn auto(no_color: bool) -> Self {
        DiffStyle {
            colored: !no_color && std::io::stderr().is_terminal(),
        }
    }

    /// Never color. Used for tests and machine-read output.
    pub fn plain() -> Self {
        DiffStyle { colored: false }
    }

    /// Always color.
    #[cfg(test)]
    fn colored() -> Self {
        DiffStyle { colored: true }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.colored && !text.is_empty() {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Render a unified diff between the current and the aligned text of one
/// target file, labeled with its path.
pub fn render_unified(path: &Path, current: &str, aligned: &str, style: DiffStyle) -> String {
    let diff = TextDiff::from_lines(current, aligned);
    let mut unified = diff.unified_diff();
    unified.context_radius(3);

    let mut out = String::new();
    out.push_str(&style.paint(BOLD, &format!("--- {} (current)", path.display())));
    out.push('\n');
    out.push_str(&style.paint(BOLD, &format!("+++ {} (aligned)", path.display())));
    out.push('\n');

    for hunk in unified.iter_hunks() {
        out.push_str(&style.paint(CYAN, &hunk.header().to_string()));
        out.push('\n');
        for change in hunk.iter_changes() {
            let line = change.value().trim_end_matches('\n');
            let styled = match change.tag() {
                ChangeTag::Delete => style.paint(RED, &format!("-{line}")),
                ChangeTag::Insert => style.paint(GREEN, &format!("+{line}")),
                ChangeTag::Equal => format!(" {line}"),
            };
            out.push_str(&styled);
            out.push('\n');
        }
    }

    out
}
