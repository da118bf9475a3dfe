//! Durations command implementation.
//!
//! The `lastrun durations` command lists the slowest tests of the last run.

use std::time::Duration;

use crate::cli::args::DurationsArgs;
use crate::error::Result;
use crate::ui::{format_duration, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The durations command implementation.
pub struct DurationsCommand {
    args: DurationsArgs,
}

impl DurationsCommand {
    /// Create a new durations command.
    pub fn new(args: DurationsArgs) -> Self {
        Self { args }
    }
}

impl Command for DurationsCommand {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let Some(info) = ctx.last_run else {
            ui.message("No previous run recorded.");
            return Ok(CommandResult::success());
        };

        let theme = ui.theme().clone();
        for (id, ms) in info.slowest(self.args.top) {
            let formatted = format_duration(Duration::from_millis(ms));
            ui.message(&format!(
                "  {}  {}",
                theme.duration.apply_to(format!("{:>8}", formatted)),
                id
            ));
        }

        Ok(CommandResult::success())
    }
}
