use std::sync::{Mutex, PoisonError};

use crate::model::task::Task;
use crate::repository::error::StoreError;
use crate::repository::traits::TaskStore;

/// Keeps the collection in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
        }
    }
}

impl TaskStore for InMemoryTaskStore {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(tasks.clone())
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let mut stored = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        *stored = tasks.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_returns_last_save() {
        let store = InMemoryTaskStore::with_tasks(vec![Task::new(1, "a")]);
        assert_eq!(store.load().unwrap(), vec![Task::new(1, "a")]);

        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
