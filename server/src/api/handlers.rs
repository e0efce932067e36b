//! HTTP handlers for the `/tasks` resource.
//!
//! Handlers hold no state of their own. Each one hands a closure to the
//! blocking pool, where [`TaskService`] does its load, mutate, save cycle
//! against the store.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use taskapi_core::{NewTask, ServiceError, Task, TaskId, TaskPatch, TaskService, TaskStore};

use super::error::ApiError;

pub type SharedService = Arc<TaskService<Arc<dyn TaskStore>>>;

/// Shared application dependencies.
#[derive(Clone)]
pub struct AppState {
    pub service: SharedService,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self {
            service: Arc::new(TaskService::new(store)),
        }
    }

    pub fn from_store<S: TaskStore + 'static>(store: S) -> Self {
        Self::new(Arc::new(store))
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /tasks
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = call(&state, |service| service.list()).await?;
    Ok(Json(tasks))
}

/// POST /tasks
///
/// Responds 201 with the stored task, or 400 when the body is not JSON or
/// carries no `title`.
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<NewTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(new_task) = body?;
    let task = call(&state, move |service| service.create(new_task)).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&raw_id)?;
    let task = call(&state, move |service| service.get(id)).await?;
    Ok(Json(task))
}

/// PUT /tasks/{id}
///
/// Merges the body into the task. Unknown ids are 404 whatever the body
/// holds, and nothing is written.
pub async fn update_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&raw_id)?;
    let patch = match body {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            call(&state, move |service| service.get(id)).await?;
            return Err(rejection.into());
        }
    };
    let task = call(&state, move |service| service.update(id, patch)).await?;
    Ok(Json(task))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_task_id(&raw_id)?;
    call(&state, move |service| service.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Ids that do not parse can never match a stored task, so they are
// reported exactly like absent ones.
fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse().map_err(|_| {
        tracing::debug!(raw, "unparseable task id");
        ApiError::NotFound
    })
}

async fn call<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&TaskService<Arc<dyn TaskStore>>) -> Result<T, ServiceError> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    let result = tokio::task::spawn_blocking(move || op(&service)).await?;
    result.map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("42").unwrap(), 42);
        assert!(matches!(parse_task_id("abc"), Err(ApiError::NotFound)));
        assert!(matches!(parse_task_id("-1"), Err(ApiError::NotFound)));
        assert!(matches!(
            parse_task_id("99999999999999999999999"),
            Err(ApiError::NotFound)
        ));
    }
}
