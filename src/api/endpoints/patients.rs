//! Patient roster endpoint.
//!
//! `GET /api/patients?q=` — roster filtered by name, with status totals.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::Patient;
use crate::patients::StatusCounts;

#[derive(Debug, Default, Deserialize)]
pub struct PatientQuery {
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct PatientListResponse {
    pub patients: Vec<Patient>,
    pub total: usize,
    pub counts: StatusCounts,
}

pub async fn list(
    State(ctx): State<ApiContext>,
    query: Result<Query<PatientQuery>, QueryRejection>,
) -> Result<Json<PatientListResponse>, ApiError> {
    let Query(query) = query?;
    let patients = ctx.core.search_patients(query.q.as_deref().unwrap_or_default());
    Ok(Json(PatientListResponse {
        total: patients.len(),
        counts: ctx.core.status_counts(),
        patients,
    }))
}
