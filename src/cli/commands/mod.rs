//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait. [`CommandDispatcher`]
//! resolves the configuration, loads the last run once, and routes the
//! subcommand to its implementation.

pub mod dispatcher;
pub mod durations;
pub mod failed;
pub mod show;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
