//! Reminder endpoints.
//!
//! - `GET /api/reminders` — every reminder, for "View All Reminders"
//! - `POST /api/reminders` — create from the reminder form
//! - `GET /api/reminders/upcoming` — the upcoming card
//! - `GET /api/reminders/:id` — prefill the edit form
//! - `PUT /api/reminders/:id` — edit
//! - `DELETE /api/reminders/:id` — delete (idempotent)
//! - `POST /api/reminders/:id/toggle` — enable/disable

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Reminder, ReminderFields};

#[derive(Serialize)]
pub struct ReminderListResponse {
    pub reminders: Vec<Reminder>,
    pub total: usize,
    pub revision: u64,
}

/// A changed reminder plus the toast text for the dashboard.
#[derive(Serialize)]
pub struct ReminderMutationResponse {
    pub reminder: Reminder,
    pub notice: &'static str,
    pub revision: u64,
}

#[derive(Serialize)]
pub struct ToggleResponse {
    pub reminder_id: String,
    pub is_active: bool,
    pub notice: &'static str,
    pub revision: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpcomingQuery {
    /// `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM[:SS]`; defaults to local now.
    pub now: Option<String>,
    pub limit: Option<usize>,
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::BadRequest(format!("Invalid reminder id: {raw}")))
}

fn parse_now(raw: Option<&str>) -> Result<NaiveDateTime, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(chrono::Local::now().naive_local());
    };
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid 'now' timestamp: {raw}")))
}

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<ReminderListResponse>, ApiError> {
    let reminders = ctx.core.list_reminders()?;
    Ok(Json(ReminderListResponse {
        total: reminders.len(),
        reminders,
        revision: ctx.core.revision(),
    }))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ReminderFields>, JsonRejection>,
) -> Result<(StatusCode, Json<ReminderMutationResponse>), ApiError> {
    let Json(fields) = payload?;
    let reminder = ctx.core.create_reminder(&fields)?;
    Ok((
        StatusCode::CREATED,
        Json(ReminderMutationResponse {
            reminder,
            notice: "Reminder created successfully",
            revision: ctx.core.revision(),
        }),
    ))
}

pub async fn upcoming(
    State(ctx): State<ApiContext>,
    query: Result<Query<UpcomingQuery>, QueryRejection>,
) -> Result<Json<ReminderListResponse>, ApiError> {
    let Query(query) = query?;
    let now = parse_now(query.now.as_deref())?;
    let reminders = match query.limit {
        Some(limit) => ctx.core.upcoming_reminders_limited(now, limit)?,
        None => ctx.core.upcoming_reminders(now)?,
    };
    Ok(Json(ReminderListResponse {
        total: reminders.len(),
        reminders,
        revision: ctx.core.revision(),
    }))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(reminder_id): Path<String>,
) -> Result<Json<Reminder>, ApiError> {
    let id = parse_id(&reminder_id)?;
    ctx.core
        .get_reminder(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Reminder {id}")))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Path(reminder_id): Path<String>,
    payload: Result<Json<ReminderFields>, JsonRejection>,
) -> Result<Json<ReminderMutationResponse>, ApiError> {
    let id = parse_id(&reminder_id)?;
    let Json(fields) = payload?;
    let reminder = ctx
        .core
        .update_reminder(id, &fields)?
        .ok_or_else(|| ApiError::NotFound(format!("Reminder {id}")))?;
    Ok(Json(ReminderMutationResponse {
        reminder,
        notice: "Reminder updated successfully",
        revision: ctx.core.revision(),
    }))
}

/// Deleting an unknown reminder still answers 204.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(reminder_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&reminder_id)?;
    ctx.core.delete_reminder(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle(
    State(ctx): State<ApiContext>,
    Path(reminder_id): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let id = parse_id(&reminder_id)?;
    let is_active = ctx
        .core
        .toggle_reminder(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Reminder {id}")))?;
    Ok(Json(ToggleResponse {
        reminder_id: id.to_string(),
        is_active,
        notice: if is_active {
            "Reminder enabled"
        } else {
            "Reminder disabled"
        },
        revision: ctx.core.revision(),
    }))
}
