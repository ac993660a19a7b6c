//! Due-date decisions for tasks: what happens when a task is completed, and
//! which due date a newly created task starts with.

use chrono::NaiveDate;

use crate::date::{format_date, parse_date};
use crate::error::CoreError;
use crate::rule::{is_known_rule_kind, RecurrenceRule};

/// What to do with a task once it has been completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advancement {
    /// Recurring task: keep it, due on the given date.
    Reschedule(NaiveDate),
    /// One-off task: remove it.
    Delete,
}

/// Decides the fate of a completed task from its stored rule and due date.
///
/// A blank rule means the task does not repeat and should be deleted; the due
/// date is not inspected in that case. Otherwise the task moves to the earliest
/// next occurrence, computed with `today` as "now".
pub fn advance_on_completion(
    rule: &str,
    due: &str,
    today: NaiveDate,
) -> Result<Advancement, CoreError> {
    if rule.trim().is_empty() {
        return Ok(Advancement::Delete);
    }

    advance(rule, parse_date(due)?, today)
}

/// Same as [`advance_on_completion`] for an already parsed due date.
pub fn advance(rule: &str, due: NaiveDate, today: NaiveDate) -> Result<Advancement, CoreError> {
    if rule.trim().is_empty() {
        return Ok(Advancement::Delete);
    }

    let rule: RecurrenceRule = rule.parse()?;
    earliest_occurrence(&rule, due, today).map(Advancement::Reschedule)
}

/// Due date for a task being created or edited.
///
/// * no date: today;
/// * a date without a rule: the date, or today if the date has already passed;
/// * a date with a rule: the earliest occurrence of the rule from that date.
pub fn initial_due_date(
    date: Option<&str>,
    rule: &str,
    today: NaiveDate,
) -> Result<NaiveDate, CoreError> {
    let rule = rule.trim();
    if !rule.is_empty() && !is_known_rule_kind(rule) {
        return Err(CoreError::InvalidRule(format!("unknown rule '{}'", rule)));
    }

    let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(date) => parse_date(date)?,
        None => return Ok(today),
    };

    if rule.is_empty() {
        return Ok(date.max(today));
    }

    let rule: RecurrenceRule = rule.parse()?;
    earliest_occurrence(&rule, date, today)
}

fn earliest_occurrence(
    rule: &RecurrenceRule,
    anchor: NaiveDate,
    now: NaiveDate,
) -> Result<NaiveDate, CoreError> {
    rule.next_after(anchor, now)?.earliest().ok_or_else(|| {
        CoreError::NoOccurrence(format!(
            "{} from {} yields no date",
            rule,
            format_date(anchor)
        ))
    })
}
