//! `GET /api/vitals/bmi` — BMI for the health tracker form.

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::config;
use crate::vitals::{self, BmiCategory};

#[derive(Debug, Deserialize)]
pub struct BmiQuery {
    pub weight_kg: f64,
    pub height_cm: Option<f64>,
}

#[derive(Serialize)]
pub struct BmiResponse {
    pub bmi: f64,
    pub category: BmiCategory,
    pub label: &'static str,
}

pub async fn bmi(
    query: Result<Query<BmiQuery>, QueryRejection>,
) -> Result<Json<BmiResponse>, ApiError> {
    let Query(query) = query?;
    let height_cm = query.height_cm.unwrap_or(config::DEFAULT_HEIGHT_CM);
    let bmi = vitals::bmi(query.weight_kg, height_cm).ok_or_else(|| {
        ApiError::BadRequest("Weight and height must be positive numbers".into())
    })?;
    let category = BmiCategory::from_bmi(bmi);
    Ok(Json(BmiResponse {
        bmi,
        category,
        label: category.label(),
    }))
}
