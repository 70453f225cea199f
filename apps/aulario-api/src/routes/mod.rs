//! Router assembly.

pub mod academics;
pub mod users;
pub mod webhooks;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/users", users::users_router())
        .nest("/webhooks", webhooks::webhooks_router())
        .nest("/students", academics::students_router())
        .nest("/teachers", academics::teachers_router())
        .nest("/subjects", academics::subjects_router())
        .nest("/rooms", academics::rooms_router())
        .nest("/schedules", academics::schedules_router())
        .nest("/grades", academics::grades_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
