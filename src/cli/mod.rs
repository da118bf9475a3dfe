//! Command-line interface for lastrun.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DurationsArgs, ShowArgs};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
