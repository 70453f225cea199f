//! User synchronization endpoints.
//!
//! - `GET /users` - list with optional search / state filter
//! - `POST /users` - provision a new user
//! - `GET /users/by-identity/:identity_id` - lookup by provider identity
//! - `GET /users/by-email/:email` - lookup by email
//! - `GET /users/:id` - get user
//! - `PUT /users/:id` - partial update
//! - `DELETE /users/:id` - delete from both stores

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;
use aulario_core::UserId;
use aulario_store::{AccountState, Role, User};
use aulario_sync::{ProvisionedUser, UpdateOutcome, UserPatch};

#[derive(Debug, Deserialize)]
pub struct ProvisionRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub search: Option<String>,
    pub state: Option<AccountState>,
}

pub fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(provision_user))
        // Static segments before /:id so they are not captured as ids.
        .route("/by-identity/:identity_id", get(get_user_by_identity))
        .route("/by-email/:email", get(get_user_by_email))
        .route(
            "/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .sync
        .list_users(query.search.as_deref(), query.state)
        .await?;
    Ok(Json(users))
}

async fn provision_user(
    State(state): State<AppState>,
    Json(req): Json<ProvisionRequest>,
) -> Result<(StatusCode, Json<ProvisionedUser>), ApiError> {
    let provisioned = state
        .sync
        .provision_user(&req.name, &req.email, req.role, &req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(provisioned)))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.sync.get_user(id).await?))
}

async fn get_user_by_identity(
    State(state): State<AppState>,
    Path(identity_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.sync.get_user_by_identity(&identity_id).await?))
}

async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.sync.get_user_by_email(&email).await?))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    Ok(Json(state.sync.update_user(id, patch).await?))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<StatusCode, ApiError> {
    state.sync.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
