use crate::domain::{Day, Task, TaskId};
use crate::ports::TaskStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Calendar {
    days: BTreeMap<String, Vec<Task>>,
    // Never decremented, so deleted ids are not handed out again.
    next_id: u64,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            days: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Process-lifetime task store. One reader/writer lock covers the whole
/// calendar and the id counter.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    inner: RwLock<Calendar>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_all(&self) -> Vec<Day> {
        let calendar = self.inner.read().await;
        calendar
            .days
            .iter()
            .map(|(date, tasks)| Day::new(date.clone(), tasks.clone()))
            .collect()
    }

    async fn add(&self, date: &str, text: &str) -> Task {
        let mut calendar = self.inner.write().await;
        let id = TaskId(calendar.next_id);
        calendar.next_id += 1;

        let task = Task::new(id, text);
        calendar
            .days
            .entry(date.to_string())
            .or_default()
            .push(task.clone());

        tracing::debug!(%id, date, "Task added");
        task
    }

    async fn update(&self, id: TaskId, date: &str, text: &str) -> bool {
        let mut calendar = self.inner.write().await;

        // get_mut rather than entry(): a miss must not leave an empty day behind.
        let found = calendar
            .days
            .get_mut(date)
            .and_then(|tasks| tasks.iter_mut().find(|task| task.id == id));

        match found {
            Some(task) => {
                task.text = text.to_string();
                tracing::debug!(%id, date, "Task updated");
                true
            }
            None => {
                tracing::debug!(%id, date, "No task to update");
                false
            }
        }
    }

    async fn remove(&self, id: TaskId) -> bool {
        let mut calendar = self.inner.write().await;
        for tasks in calendar.days.values_mut() {
            tasks.retain(|task| task.id != id);
        }

        tracing::debug!(%id, "Task removed");
        true
    }
}
