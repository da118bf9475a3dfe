//! Failed command implementation.
//!
//! The `lastrun failed` command prints one failed test id per line so the
//! output can be piped into a rerun.

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The failed command implementation.
pub struct FailedCommand;

impl Command for FailedCommand {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        if let Some(info) = ctx.last_run {
            for id in &info.failed_tests {
                ui.message(id);
            }
        }
        Ok(CommandResult::success())
    }
}
