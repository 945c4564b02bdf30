//! Passenger-facing routes: submit a complaint, check its status.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use triage_core::{clean_text, extract_pnr, ComplaintId, ComplaintRecord, Prediction};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// How many scored predictions a submission stores and returns.
const TOP_K: usize = 3;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// Raw complaint text.
    pub complaint: String,
    /// Booking reference, if the passenger provided one separately.
    #[serde(default)]
    pub pnr: Option<String>,
    /// Free-form complaint category from the form. Accepted for
    /// compatibility with the frontend; the model's prediction is what
    /// drives routing.
    #[serde(default)]
    pub complaint_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub complaint_id: ComplaintId,
    pub predicted: Vec<Prediction>,
}

/// POST /submit — classify and record a new complaint.
///
/// The complaint text is normalized and run through the fitted
/// vectorizer and classifier loaded at startup. The record stores the
/// top predictions with their real probabilities and starts out
/// assigned to the best one.
async fn submit(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> ApiResult<Json<SubmitResponse>> {
    let complaint = request.complaint.trim();
    if complaint.is_empty() {
        return Err(ApiError::BadRequest(
            "complaint text cannot be empty".to_string(),
        ));
    }

    let features = state.vectorizer().transform(&clean_text(complaint));
    let predicted = state.model().predict_topk(&features, TOP_K);

    // Prefer an explicitly provided PNR, fall back to the first 10-digit
    // run in the text, else leave it empty.
    let pnr = request
        .pnr
        .filter(|p| !p.trim().is_empty())
        .or_else(|| extract_pnr(complaint))
        .unwrap_or_default();

    let _complaint_type = request.complaint_type;

    let record = ComplaintRecord::new(pnr, complaint.to_string(), predicted.clone());
    let complaint_id = state.ledger().create(record).await?;

    tracing::info!(
        complaint_id = %complaint_id,
        department = %predicted.first().map(|p| p.department.as_str()).unwrap_or("-"),
        "complaint submitted"
    );

    Ok(Json(SubmitResponse {
        complaint_id,
        predicted,
    }))
}

/// GET /status/{id} — full record for a complaint, or 404.
async fn status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ComplaintRecord>> {
    let id = ComplaintId::from_string(id);
    let record = state
        .ledger()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("complaint {id} not found")))?;
    Ok(Json(record))
}

/// Build passenger-facing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit))
        .route("/status/{id}", get(status))
}
