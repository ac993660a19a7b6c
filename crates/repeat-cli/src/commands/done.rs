use anyhow::Result;
use repeat_core::completion::advance;
use tracing::debug;

use crate::cli::DoneCommand;
use crate::commands::Context;
use crate::parser::parse_date_arg;
use crate::views;

pub fn complete_task(command: DoneCommand, ctx: &Context) -> Result<()> {
    let due = parse_date_arg(&command.date, ctx.today)?;
    let today = command
        .today
        .as_deref()
        .map(|today| parse_date_arg(today, ctx.today))
        .transpose()?
        .unwrap_or(ctx.today);

    let advancement = advance(&command.rule, due, today)?;
    debug!(rule = %command.rule, %due, %today, ?advancement, "completed task");

    views::print_advancement(&advancement, today, ctx.format);
    Ok(())
}
