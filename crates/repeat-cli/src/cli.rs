use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

/// Next due dates for recurring tasks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (overrides the configured one)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the next occurrence(s) of a rule
    Next(NextCommand),
    /// Decide what happens to a task when it is completed
    Done(DoneCommand),
    /// Compute the initial due date of a new task
    Schedule(ScheduleCommand),
    /// Validate and describe a rule
    Check(CheckCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct NextCommand {
    /// The repeat rule, e.g. 'd3', 'y', 'w1,3', 'm15,-1 2,8'
    pub rule: String,
    /// The task's current due date
    #[arg(short, long)]
    pub date: String,
    /// The date to count from (defaults to today)
    #[arg(short, long)]
    pub now: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The task's repeat rule; omit for a one-off task
    #[arg(default_value = "")]
    pub rule: String,
    /// The task's current due date
    #[arg(short, long)]
    pub date: String,
    /// The completion date (defaults to today)
    #[arg(long)]
    pub today: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ScheduleCommand {
    /// Requested due date (defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Repeat rule of the new task
    #[arg(short, long, default_value = "")]
    pub rule: String,
    /// The creation date (defaults to today)
    #[arg(long)]
    pub today: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckCommand {
    /// The repeat rule to validate
    pub rule: String,
}
