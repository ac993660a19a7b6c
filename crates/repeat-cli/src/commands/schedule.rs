use anyhow::Result;
use repeat_core::completion::initial_due_date;
use repeat_core::date::format_date;

use crate::cli::ScheduleCommand;
use crate::commands::Context;
use crate::parser::parse_date_arg;
use crate::views;

pub fn schedule_task(command: ScheduleCommand, ctx: &Context) -> Result<()> {
    let today = command
        .today
        .as_deref()
        .map(|today| parse_date_arg(today, ctx.today))
        .transpose()?
        .unwrap_or(ctx.today);
    let requested = command
        .date
        .as_deref()
        .map(|date| parse_date_arg(date, today))
        .transpose()?
        .map(format_date);

    let due = initial_due_date(requested.as_deref(), &command.rule, today)?;

    views::print_due_date(due, today, ctx.format);
    Ok(())
}
