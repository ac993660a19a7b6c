use chrono::NaiveDate;

use crate::config::OutputFormat;

pub mod check;
pub mod done;
pub mod next;
pub mod schedule;

/// Values every command resolves against.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub today: NaiveDate,
    pub format: OutputFormat,
}
