//! Task records, their persistence and the CRUD rules applied to them.

pub mod model;
pub mod repository;
pub mod service;

pub use model::task::{NewTask, Task, TaskId, TaskPatch};
pub use repository::{FileTaskStore, InMemoryTaskStore, StoreError, TaskStore};
pub use service::task_service::{ServiceError, TaskService};
