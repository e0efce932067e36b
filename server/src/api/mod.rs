//! HTTP surface of the task service.

pub mod error;
pub mod handlers;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorBody};
pub use handlers::{
    create_task, delete_task, get_task, health_check, list_tasks, update_task, AppState,
};

/// Builds the application router with request tracing attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
