use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::completion::{advance, Advancement};
use crate::date::{format_date, parse_dotted_date};
use crate::error::CoreError;
use crate::models::{CompletionResult, Task};

/// Default number of tasks returned by a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 25;

/// How a search keyword selects tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSearch {
    /// Blank keyword: every task.
    All,
    /// `DD.MM.YYYY` keyword: tasks due on that day.
    OnDate(NaiveDate),
    /// Any other keyword, lowercased: substring of the title or comment.
    Text(String),
}

impl TaskSearch {
    pub fn from_keyword(keyword: &str) -> Self {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return TaskSearch::All;
        }
        match parse_dotted_date(keyword) {
            Ok(date) => TaskSearch::OnDate(date),
            Err(_) => TaskSearch::Text(keyword.to_lowercase()),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskSearch::All => true,
            TaskSearch::OnDate(date) => task.date == *date,
            TaskSearch::Text(needle) => {
                task.title.to_lowercase().contains(needle)
                    || task.comment.to_lowercase().contains(needle)
            }
        }
    }
}

/// Storage seam for tasks.
///
/// Implementors only store and fetch; due-date decisions live in
/// [`TaskRepository::complete_task`].
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn add_task(&self, task: Task) -> Result<Task, CoreError>;
    async fn find_task(&self, id: &str) -> Result<Option<Task>, CoreError>;
    /// All tasks ordered by due date.
    async fn list_tasks(&self) -> Result<Vec<Task>, CoreError>;
    async fn update_due_date(&self, id: &str, date: NaiveDate) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: &str) -> Result<Task, CoreError>;
    /// Tasks selected by `keyword` (see [`TaskSearch`]), ordered by due date and
    /// capped at `limit`.
    async fn search_tasks(&self, keyword: &str, limit: usize) -> Result<Vec<Task>, CoreError>;

    /// Completes a task: one-off tasks are deleted, recurring tasks move to
    /// their next due date.
    async fn complete_task(&self, id: &str, today: NaiveDate) -> Result<CompletionResult, CoreError> {
        let task = self
            .find_task(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        match advance(&task.repeat, task.date, today)? {
            Advancement::Delete => {
                debug!(task_id = %id, "completed one-off task, deleting");
                let deleted = self.delete_task(id).await?;
                Ok(CompletionResult::Deleted(deleted))
            }
            Advancement::Reschedule(next) => {
                debug!(
                    task_id = %id,
                    rule = %task.repeat,
                    from = %format_date(task.date),
                    to = %format_date(next),
                    "rescheduling recurring task"
                );
                let updated = self.update_due_date(id, next).await?;
                Ok(CompletionResult::Rescheduled {
                    task: updated,
                    previous_due: task.date,
                })
            }
        }
    }
}

/// Task storage held in memory, keyed by task id.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tasks: RwLock<BTreeMap<String, Task>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks.into_iter().map(|t| (t.id.clone(), t)).collect()),
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryRepository {
    async fn add_task(&self, task: Task) -> Result<Task, CoreError> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.id) {
            return Err(CoreError::InvalidInput(format!(
                "task '{}' already exists",
                task.id
            )));
        }
        tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: &str) -> Result<Option<Task>, CoreError> {
        Ok(self.tasks.read().await.get(id).cloned())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, CoreError> {
        let mut tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        tasks.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(tasks)
    }

    async fn update_due_date(&self, id: &str, date: NaiveDate) -> Result<Task, CoreError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        task.date = date;
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &str) -> Result<Task, CoreError> {
        self.tasks
            .write()
            .await
            .remove(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    async fn search_tasks(&self, keyword: &str, limit: usize) -> Result<Vec<Task>, CoreError> {
        let search = TaskSearch::from_keyword(keyword);
        debug!(?search, limit, "searching tasks");

        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|task| search.matches(task))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        tasks.truncate(limit);
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, date: NaiveDate, repeat: &str) -> Task {
        Task {
            id: id.to_string(),
            date,
            title: format!("Task {}", id),
            comment: String::new(),
            repeat: repeat.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_id() {
        let repo = InMemoryRepository::new();
        repo.add_task(task("1", ymd(2024, 1, 1), "")).await.unwrap();
        let result = repo.add_task(task("1", ymd(2024, 1, 2), "")).await;
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_list_orders_by_date() {
        let repo = InMemoryRepository::with_tasks(vec![
            task("b", ymd(2024, 3, 1), ""),
            task("a", ymd(2024, 1, 1), ""),
            task("c", ymd(2024, 1, 1), ""),
        ]);
        let ids: Vec<String> = repo.list_tasks().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn test_complete_one_off_deletes() {
        let repo = InMemoryRepository::with_tasks(vec![task("1", ymd(2024, 1, 1), "")]);
        let result = repo.complete_task("1", ymd(2024, 1, 5)).await.unwrap();
        assert!(matches!(result, CompletionResult::Deleted(ref t) if t.id == "1"));
        assert!(repo.find_task("1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_complete_recurring_reschedules() {
        let repo = InMemoryRepository::with_tasks(vec![task("1", ymd(2024, 1, 1), "d3")]);
        let result = repo.complete_task("1", ymd(2024, 1, 5)).await.unwrap();
        match result {
            CompletionResult::Rescheduled { task, previous_due } => {
                assert_eq!(task.date, ymd(2024, 1, 7));
                assert_eq!(previous_due, ymd(2024, 1, 1));
            }
            other => panic!("Expected a rescheduled task, got {:?}", other),
        }
        assert_eq!(repo.find_task("1").await.unwrap().unwrap().date, ymd(2024, 1, 7));
    }

    #[tokio::test]
    async fn test_complete_missing_task() {
        let repo = InMemoryRepository::new();
        let result = repo.complete_task("404", ymd(2024, 1, 5)).await;
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_complete_with_bad_rule_keeps_task() {
        let repo = InMemoryRepository::with_tasks(vec![task("1", ymd(2024, 1, 1), "w9")]);
        let result = repo.complete_task("1", ymd(2024, 1, 5)).await;
        assert!(matches!(result, Err(CoreError::InvalidRuleParameter(_))));
        assert!(repo.find_task("1").await.unwrap().is_some());
    }

    fn noted(id: &str, date: NaiveDate, title: &str, comment: &str) -> Task {
        Task {
            title: title.to_string(),
            comment: comment.to_string(),
            ..task(id, date, "")
        }
    }

    fn search_fixture() -> InMemoryRepository {
        InMemoryRepository::with_tasks(vec![
            noted("1", ymd(2024, 3, 1), "Pay rent", ""),
            noted("2", ymd(2024, 1, 15), "Dentist", "bring the RENT receipt"),
            noted("3", ymd(2024, 1, 15), "Water plants", ""),
            noted("4", ymd(2024, 2, 1), "Gym", "leg day"),
        ])
    }

    fn ids(tasks: Vec<Task>) -> Vec<String> {
        tasks.into_iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_search_keyword_modes() {
        assert_eq!(TaskSearch::from_keyword("  "), TaskSearch::All);
        assert_eq!(TaskSearch::from_keyword("15.01.2024"), TaskSearch::OnDate(ymd(2024, 1, 15)));
        assert_eq!(TaskSearch::from_keyword("Rent"), TaskSearch::Text("rent".to_string()));
        assert_eq!(TaskSearch::from_keyword("31.02.2024"), TaskSearch::Text("31.02.2024".to_string()));
    }

    #[tokio::test]
    async fn test_search_without_keyword_lists_by_date_with_limit() {
        let repo = search_fixture();
        assert_eq!(ids(repo.search_tasks("", DEFAULT_SEARCH_LIMIT).await.unwrap()), vec!["2", "3", "4", "1"]);
        assert_eq!(ids(repo.search_tasks("", 2).await.unwrap()), vec!["2", "3"]);
    }

    #[tokio::test]
    async fn test_search_by_dotted_date() {
        let repo = search_fixture();
        assert_eq!(ids(repo.search_tasks("15.01.2024", DEFAULT_SEARCH_LIMIT).await.unwrap()), vec!["2", "3"]);
        assert!(repo.search_tasks("16.01.2024", DEFAULT_SEARCH_LIMIT).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_text_matches_title_or_comment_ignoring_case() {
        let repo = search_fixture();
        assert_eq!(ids(repo.search_tasks("rent", DEFAULT_SEARCH_LIMIT).await.unwrap()), vec!["2", "1"]);
        assert_eq!(ids(repo.search_tasks("LEG", DEFAULT_SEARCH_LIMIT).await.unwrap()), vec!["4"]);
        assert!(repo.search_tasks("taxes", DEFAULT_SEARCH_LIMIT).await.unwrap().is_empty());
    }
}
