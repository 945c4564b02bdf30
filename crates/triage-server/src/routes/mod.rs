//! Route definitions for the HTTP API.

pub mod admin;
pub mod complaints;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(complaints::routes())
        .merge(admin::routes())
        .with_state(state)
}
