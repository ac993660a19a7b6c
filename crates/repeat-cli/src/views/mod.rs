use chrono::NaiveDate;
use owo_colors::OwoColorize;
use repeat_core::completion::Advancement;
use repeat_core::date::format_date;
use repeat_core::recurrence::NextOccurrence;
use repeat_core::rule::RecurrenceRule;
use serde_json::json;

use crate::config::OutputFormat;

pub mod table;

pub fn print_occurrences(next: &NextOccurrence, today: NaiveDate, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let value = match next {
                NextOccurrence::Single(date) => json!(format_date(*date)),
                NextOccurrence::Candidates(_) => json!(next.to_strings()),
            };
            println!("{}", value);
        }
        OutputFormat::Table => table::display_dates(next.dates(), today),
        OutputFormat::Plain => {
            if next.is_empty() {
                println!("{}", "No upcoming dates for this rule.".yellow());
                return;
            }
            for date in next.dates() {
                println!(
                    "{}  {}",
                    format_date(*date).green().bold(),
                    table::relative_to(*date, today).dimmed()
                );
            }
        }
    }
}

pub fn print_advancement(advancement: &Advancement, today: NaiveDate, format: OutputFormat) {
    match (advancement, format) {
        (Advancement::Reschedule(date), OutputFormat::Json) => {
            println!("{}", json!({ "action": "reschedule", "date": format_date(*date) }));
        }
        (Advancement::Delete, OutputFormat::Json) => {
            println!("{}", json!({ "action": "delete" }));
        }
        (Advancement::Reschedule(date), _) => {
            println!(
                "Next due date: {} ({})",
                format_date(*date).green().bold(),
                table::relative_to(*date, today)
            );
        }
        (Advancement::Delete, _) => {
            println!("Task does not repeat: {}", "delete".red().bold());
        }
    }
}

pub fn print_due_date(date: NaiveDate, today: NaiveDate, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", json!({ "date": format_date(date) })),
        OutputFormat::Table => table::display_dates(std::slice::from_ref(&date), today),
        OutputFormat::Plain => println!(
            "Due date: {} ({})",
            format_date(date).green().bold(),
            table::relative_to(date, today)
        ),
    }
}

pub fn print_rule(raw: &str, rule: &RecurrenceRule, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                json!({
                    "rule": raw.trim(),
                    "description": rule.to_string(),
                    "parsed": rule,
                })
            );
        }
        OutputFormat::Plain | OutputFormat::Table => {
            println!("{} {}: {}", "✓".green(), raw.trim().bold(), rule);
        }
    }
}
