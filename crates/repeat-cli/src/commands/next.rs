use anyhow::Result;
use repeat_core::rule::RecurrenceRule;
use tracing::debug;

use crate::cli::NextCommand;
use crate::commands::Context;
use crate::parser::parse_date_arg;
use crate::views;

pub fn show_next(command: NextCommand, ctx: &Context) -> Result<()> {
    let anchor = parse_date_arg(&command.date, ctx.today)?;
    let now = command
        .now
        .as_deref()
        .map(|now| parse_date_arg(now, ctx.today))
        .transpose()?
        .unwrap_or(ctx.today);
    let rule: RecurrenceRule = command.rule.parse()?;

    debug!(rule = %command.rule, %anchor, %now, "computing next occurrence");
    let next = rule.next_after(anchor, now)?;

    views::print_occurrences(&next, now, ctx.format);
    Ok(())
}
