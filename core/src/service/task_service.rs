use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::repository::{StoreError, TaskStore};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("task {0} not found")]
    NotFound(TaskId),

    #[error("title is required")]
    MissingTitle,

    #[error("no task ids left to assign")]
    IdSpaceExhausted,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

/// CRUD over a [`TaskStore`].
///
/// Every call reloads the full collection, so the store stays the single
/// source of truth. One lock covers the whole load, mutate, save sequence,
/// which keeps concurrent writers from losing each other's updates.
pub struct TaskService<S: TaskStore> {
    store: S,
    // Highest id handed out by this process. Keeps ids unique even after
    // the task holding the maximum id has been deleted.
    last_id: Mutex<TaskId>,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            last_id: Mutex::new(0),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> Result<Vec<Task>> {
        let _guard = self.lock();
        let tasks = self.store.load()?;
        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    pub fn get(&self, id: TaskId) -> Result<Task> {
        let _guard = self.lock();
        self.store
            .load()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(ServiceError::NotFound(id))
    }

    pub fn create(&self, new_task: NewTask) -> Result<Task> {
        let mut last_id = self.lock();
        let mut tasks = self.store.load()?;

        let id = next_id(*last_id, &tasks).ok_or(ServiceError::IdSpaceExhausted)?;
        let task = new_task.into_task(id).ok_or(ServiceError::MissingTitle)?;
        tasks.push(task.clone());
        self.store.save(&tasks)?;
        *last_id = id;

        tracing::info!(id, "created task");
        Ok(task)
    }

    pub fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        let _guard = self.lock();
        let mut tasks = self.store.load()?;

        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        task.apply(patch);
        let updated = task.clone();
        self.store.save(&tasks)?;

        tracing::debug!(id, "updated task");
        Ok(updated)
    }

    pub fn delete(&self, id: TaskId) -> Result<()> {
        let _guard = self.lock();
        let mut tasks = self.store.load()?;

        let pos = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        tasks.remove(pos);
        self.store.save(&tasks)?;

        tracing::info!(id, "deleted task");
        Ok(())
    }

    // The guarded value is a plain counter, so a panic elsewhere cannot
    // leave it half-updated.
    fn lock(&self) -> MutexGuard<'_, TaskId> {
        self.last_id.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn next_id(last_issued: TaskId, tasks: &[Task]) -> Option<TaskId> {
    let max_stored = tasks.iter().map(|t| t.id).max().unwrap_or(0);
    last_issued.max(max_stored).checked_add(1)
}
