use crate::domain::{Day, Task, TaskId};
use async_trait::async_trait;

/// Shared calendar state. Every call must appear atomic to concurrent callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Snapshot of every day and its tasks.
    async fn list_all(&self) -> Vec<Day>;

    /// Assigns the next id and appends the task to `date`, creating the day if needed.
    async fn add(&self, date: &str, text: &str) -> Task;

    /// Replaces the text of `id`, looking only inside `date`. Returns false when
    /// the task is not in that day.
    async fn update(&self, id: TaskId, date: &str, text: &str) -> bool;

    /// Removes `id` from whichever day holds it. Always reports success.
    async fn remove(&self, id: TaskId) -> bool;
}
