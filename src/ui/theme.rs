//! Visual theme and styling.

use console::Style;

use crate::state::RunStatus;

/// Styles used by command output.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Success messages and passed runs (green).
    pub success: Style,
    /// Warnings and interrupted runs (orange).
    pub warning: Style,
    /// Errors and failed runs (red bold).
    pub error: Style,
    /// Key labels in key-value displays (bold).
    pub key: Style,
    /// Durations (dim).
    pub duration: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    /// Colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            key: Style::new().bold(),
            duration: Style::new().dim(),
        }
    }

    /// Theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            key: Style::new(),
            duration: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Icon and label for a run status.
    pub fn format_status(&self, status: RunStatus) -> String {
        match status {
            RunStatus::Passed => format!("{}", self.success.apply_to(format!("✓ {}", status))),
            RunStatus::Failed | RunStatus::TimedOut => {
                format!("{}", self.error.apply_to(format!("✗ {}", status)))
            }
            RunStatus::Interrupted => {
                format!("{}", self.warning.apply_to(format!("⚠ {}", status)))
            }
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
