//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::filter_projects;
use crate::error::Result;
use crate::state::{LastRunInfo, LastRunTracker};
use crate::ui::UserInterface;

/// What every command gets to work with.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    /// Resolved state file, if any.
    pub last_run_file: Option<&'a Path>,
    /// Record of the previous run, if one could be loaded.
    pub last_run: Option<&'a LastRunInfo>,
}

/// Trait for command implementations.
pub trait Command {
    /// Execute the command against the loaded last run.
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve configuration, load the last run and execute the subcommand.
    ///
    /// Unlike the tracker, an unknown project selector is reported as an
    /// error here so typos on the command line don't look like "no runs".
    pub async fn dispatch(
        &self,
        cli: &Cli,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let config = cli.run_config(&self.project_root)?;
        if config.last_run_file.is_none() {
            filter_projects(&config.projects, config.cli_project_filter.as_deref())?;
        }

        let tracker = LastRunTracker::new(&config);
        let last_run = tracker.last_run_info().await;
        let ctx = CommandContext {
            last_run_file: tracker.last_run_file(),
            last_run: last_run.as_ref(),
        };

        match cli.command.clone().unwrap_or_default() {
            Commands::Show(args) => super::show::ShowCommand::new(args).execute(&ctx, ui),
            Commands::Failed => super::failed::FailedCommand.execute(&ctx, ui),
            Commands::Durations(args) => {
                super::durations::DurationsCommand::new(args).execute(&ctx, ui)
            }
        }
    }
}
