use anyhow::Result;
use repeat_core::rule::RecurrenceRule;

use crate::cli::CheckCommand;
use crate::commands::Context;
use crate::views;

pub fn check_rule(command: CheckCommand, ctx: &Context) -> Result<()> {
    let rule: RecurrenceRule = command.rule.parse()?;
    views::print_rule(&command.rule, &rule, ctx.format);
    Ok(())
}
