//! Show command implementation.
//!
//! The `lastrun show` command summarizes the last recorded run.

use std::time::Duration;

use crate::cli::args::ShowArgs;
use crate::error::Result;
use crate::ui::{format_duration, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The show command implementation.
pub struct ShowCommand {
    args: ShowArgs,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(args: ShowArgs) -> Self {
        Self { args }
    }
}

impl Command for ShowCommand {
    fn execute(
        &self,
        ctx: &CommandContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let Some(path) = ctx.last_run_file else {
            ui.warning(
                "No last-run file configured. Pass --last-run-file or configure a project.",
            );
            if self.args.json {
                ui.message("null");
            }
            return Ok(CommandResult::success());
        };

        let Some(info) = ctx.last_run else {
            if self.args.json {
                ui.message("null");
            } else {
                ui.message("No previous run recorded.");
            }
            return Ok(CommandResult::success());
        };

        if self.args.json {
            ui.message(&info.to_json_pretty()?);
            return Ok(CommandResult::success());
        }

        let theme = ui.theme().clone();
        let total = info.test_durations.len();

        ui.message(&format!(
            "  {}      {}",
            theme.key.apply_to("File:"),
            path.display()
        ));
        ui.message(&format!(
            "  {}    {}",
            theme.key.apply_to("Status:"),
            theme.format_status(info.status)
        ));
        ui.message(&format!(
            "  {}    {} of {} tests",
            theme.key.apply_to("Failed:"),
            info.failed_tests.len(),
            total
        ));
        ui.message(&format!(
            "  {}  {}",
            theme.key.apply_to("Duration:"),
            theme
                .duration
                .apply_to(format_duration(Duration::from_millis(info.total_duration_ms())))
        ));

        if info.failed_tests.is_empty() {
            ui.success("No failed tests");
        } else {
            ui.message("");
            ui.message(&format!("  {}", theme.key.apply_to("Failed tests:")));
            for id in &info.failed_tests {
                ui.message(&format!("    {}", theme.format_error(id)));
            }
        }

        Ok(CommandResult::success())
    }
}
