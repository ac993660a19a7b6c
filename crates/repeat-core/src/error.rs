use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Invalid rule parameter: {0}")]
    InvalidRuleParameter(String),

    #[error("No upcoming occurrence: {0}")]
    NoOccurrence(String),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
