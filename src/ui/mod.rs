//! Terminal output for the `lastrun` binary.
//!
//! - [`UserInterface`] trait so commands can be tested with [`MockUI`]
//! - [`TerminalUI`] for real terminal output
//! - [`Theme`] for styling and [`format_duration`] for durations

pub mod format;
pub mod mock;
pub mod terminal;
pub mod theme;

pub use format::format_duration;
pub use mock::MockUI;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, Theme};

/// Trait for user-facing output.
pub trait UserInterface {
    /// Display a plain line.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Styling for composed lines.
    fn theme(&self) -> &Theme;
}
