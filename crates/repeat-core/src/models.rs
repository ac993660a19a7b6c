use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::completion::initial_due_date;
use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(with = "layout_date")]
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub comment: String,
    /// Recurrence rule; empty for a one-off task.
    #[serde(default)]
    pub repeat: String,
}

impl Task {
    #[inline]
    pub fn is_recurring(&self) -> bool {
        !self.repeat.trim().is_empty()
    }
}

/// Fields supplied by a caller creating or editing a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTaskData {
    /// Due date in `YYYYMMDD`; empty or absent means today.
    #[serde(default)]
    pub date: Option<String>,
    pub title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub repeat: String,
}

impl NewTaskData {
    /// Validates the data and builds a task with its initial due date.
    pub fn into_task(self, id: impl Into<String>, today: NaiveDate) -> Result<Task, CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::InvalidInput("title should not be empty".to_string()));
        }

        let date = initial_due_date(self.date.as_deref(), &self.repeat, today)?;

        Ok(Task {
            id: id.into(),
            date,
            title: self.title,
            comment: self.comment,
            repeat: self.repeat.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// A one-off task was removed.
    Deleted(Task),
    /// A recurring task moved to its next due date.
    Rescheduled { task: Task, previous_due: NaiveDate },
}

/// Serde adapter storing dates in the fixed `YYYYMMDD` layout.
pub mod layout_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::date::{format_date, parse_date};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse_date(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_into_task_requires_title() {
        let data = NewTaskData {
            title: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(data.into_task("1", ymd(2024, 1, 1)), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_into_task_schedules_recurring() {
        let data = NewTaskData {
            date: Some("20240101".to_string()),
            title: "Water plants".to_string(),
            repeat: " d3 ".to_string(),
            ..Default::default()
        };
        let task = data.into_task("7", ymd(2024, 1, 5)).unwrap();
        assert_eq!(task.id, "7");
        assert_eq!(task.date, ymd(2024, 1, 7));
        assert_eq!(task.repeat, "d3");
        assert!(task.is_recurring());
    }

    #[test]
    fn test_task_serializes_layout_date() {
        let task = Task {
            id: "1".to_string(),
            date: ymd(2024, 2, 29),
            title: "Pay rent".to_string(),
            comment: String::new(),
            repeat: "m-1".to_string(),
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"date\":\"20240229\""));

        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }

    #[test]
    fn test_task_rejects_bad_layout_date() {
        let json = r#"{"id":"1","date":"2024-02-29","title":"x"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }
}
