use std::sync::Arc;

use crate::model::task::Task;
use crate::repository::StoreError;

/// Durable home of the whole task collection.
///
/// Implementations keep no cache: `load` always observes the last `save`.
pub trait TaskStore: Send + Sync {
    /// Returns the persisted tasks in insertion order. An absent or empty
    /// backing record reads as an empty collection.
    fn load(&self) -> Result<Vec<Task>, StoreError>;

    /// Replaces the persisted collection with `tasks`.
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

impl<S: TaskStore + ?Sized> TaskStore for Arc<S> {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        (**self).save(tasks)
    }
}
