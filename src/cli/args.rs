//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{load_run_config, RunConfig};
use crate::error::Result;

/// lastrun - Inspect the recorded outcome of the previous test run.
#[derive(Debug, Parser)]
#[command(name = "lastrun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default lastrun.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the last-run state file (overrides project output directories)
    #[arg(long, global = true, env = "LASTRUN_FILE")]
    pub last_run_file: Option<PathBuf>,

    /// Only consider these projects (comma-separated, `*` wildcards allowed)
    #[arg(short, long = "project", global = true, value_delimiter = ',')]
    pub projects: Vec<String>,

    /// Path to project root (overrides current directory)
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Resolve the run configuration, applying command-line overrides on top
    /// of the config file.
    pub fn run_config(&self, project_root: &Path) -> Result<RunConfig> {
        let mut config = load_run_config(project_root, self.config.as_deref())?;

        if let Some(path) = &self.last_run_file {
            config.last_run_file = Some(project_root.join(path));
        }
        if !self.projects.is_empty() {
            config.cli_project_filter = Some(self.projects.clone());
        }

        Ok(config)
    }
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show the status of the last run (default if no command specified)
    Show(ShowArgs),

    /// Print the ids of tests that failed in the last run, one per line
    Failed,

    /// Show the slowest tests of the last run
    Durations(DurationsArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Self::Show(ShowArgs::default())
    }
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShowArgs {
    /// Print the raw state file as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `durations` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DurationsArgs {
    /// Number of tests to show
    #[arg(short = 'n', long, default_value_t = 10)]
    pub top: usize,
}

impl Default for DurationsArgs {
    fn default() -> Self {
        Self { top: 10 }
    }
}
