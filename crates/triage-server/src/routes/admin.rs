//! Staff-facing routes: login, list all complaints, update triage state.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use triage_core::{ComplaintId, ComplaintRecord};
use triage_store::users;

use crate::auth::{self, AuthenticatedStaff};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: StaffInfo,
}

#[derive(Debug, Serialize)]
pub struct StaffInfo {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// New free-form status.
    pub status: String,
    /// Comma-separated department list, as the dashboard sends it.
    pub departments: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub message: String,
}

/// POST /admin/login — authenticate a staff member, return a bearer token.
///
/// Unknown usernames and wrong passwords get the same generic message.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if request.username.trim().is_empty() {
        return Err(ApiError::BadRequest("username cannot be empty".to_string()));
    }

    let invalid = || ApiError::Unauthorized("Invalid username or password".to_string());

    let user = state
        .users()
        .get_user(request.username.trim())
        .await?
        .ok_or_else(invalid)?;

    if !users::verify_password(&request.password, &user.password_hash)? {
        return Err(invalid());
    }

    let config = state.config();
    let access_token =
        auth::create_token(&user.username, &config.jwt_secret, config.jwt_expire_minutes)?;

    tracing::info!(username = %user.username, "staff logged in");

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        user: StaffInfo {
            username: user.username,
        },
    }))
}

/// GET /admin/complaints — the entire ledger. Protected.
async fn list_complaints(
    State(state): State<AppState>,
    _staff: AuthenticatedStaff,
) -> ApiResult<Json<BTreeMap<ComplaintId, ComplaintRecord>>> {
    Ok(Json(state.ledger().list_all().await?))
}

/// POST /admin/update/{id} — set status and assigned departments. Protected.
async fn update_complaint(
    State(state): State<AppState>,
    staff: AuthenticatedStaff,
    Path(id): Path<String>,
    Json(request): Json<UpdateRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let id = ComplaintId::from_string(id);
    let departments: Vec<String> = request
        .departments
        .split(',')
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect();

    state
        .ledger()
        .update(&id, request.status, departments)
        .await?;

    tracing::info!(complaint_id = %id, username = %staff.username, "complaint updated");

    Ok(Json(UpdateResponse {
        message: "Updated successfully".to_string(),
    }))
}

/// Build staff routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/complaints", get(list_complaints))
        .route("/admin/update/{id}", post(update_complaint))
}
