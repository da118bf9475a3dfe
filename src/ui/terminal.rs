//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, Theme, UserInterface};

/// Writes to stdout, errors to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: Theme,
}

impl TerminalUI {
    /// Create a terminal UI, colored when stdout is a TTY and `NO_COLOR` is unset.
    pub fn new() -> Self {
        let theme = if should_use_colors() {
            Theme::new()
        } else {
            Theme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }
}
