//! Critical-alert highlight endpoints.
//!
//! - `POST /api/alerts/critical/highlight?q=` — focus the first critical
//!   patient among those matching the current search
//! - `GET /api/alerts/critical/highlight` — highlight status for polling
//! - `DELETE /api/alerts/critical/highlight` — dashboard closed, cancel

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::endpoints::patients::PatientQuery;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::core_state::HighlightStatus;

#[derive(Serialize)]
pub struct HighlightResponse {
    pub focused_patient_id: Option<String>,
    pub duration_secs: u64,
    pub status: HighlightStatus,
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

pub async fn highlight(
    State(ctx): State<ApiContext>,
    query: Result<Query<PatientQuery>, QueryRejection>,
) -> Result<Json<HighlightResponse>, ApiError> {
    let Query(query) = query?;
    let focused_patient_id = ctx
        .core
        .request_critical_highlight(query.q.as_deref().unwrap_or_default())?;

    Ok(Json(HighlightResponse {
        focused_patient_id,
        duration_secs: ctx.core.highlight_duration().as_secs(),
        status: ctx.core.highlight_status(),
    }))
}

pub async fn status(State(ctx): State<ApiContext>) -> Json<HighlightStatus> {
    Json(ctx.core.highlight_status())
}

pub async fn cancel(State(ctx): State<ApiContext>) -> Json<CancelResponse> {
    Json(CancelResponse {
        cancelled: ctx.core.cancel_highlight(),
    })
}
