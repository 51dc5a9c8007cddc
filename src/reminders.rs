//! Reminder store — checkups, medicines and appointments for one
//! dashboard session.
//!
//! The store is the only write path for reminders. Reads of the
//! "upcoming" card are derived on demand from the current contents and a
//! caller-supplied clock, so they can never be stale relative to a
//! completed mutation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Reminder, ReminderFields, ReminderFrequency, ReminderKind};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 500;

// ═══════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════

/// Rejected reminder form. The message is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields ({field} is missing)")]
    MissingField { field: &'static str },

    #[error("Invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("Invalid time '{value}' (expected HH:MM)")]
    InvalidTime { value: String },

    #[error("{field} must be {max} characters or fewer")]
    TooLong { field: &'static str, max: usize },
}

/// Form fields after trimming and parsing.
struct ValidFields {
    kind: ReminderKind,
    title: String,
    description: Option<String>,
    date: NaiveDate,
    time: NaiveTime,
    frequency: ReminderFrequency,
}

fn validate(fields: &ReminderFields) -> Result<ValidFields, ValidationError> {
    let title = fields.title.trim();
    let date = fields.date.trim();
    let time = fields.time.trim();

    if title.is_empty() {
        return Err(ValidationError::MissingField { field: "title" });
    }
    if date.is_empty() {
        return Err(ValidationError::MissingField { field: "date" });
    }
    if time.is_empty() {
        return Err(ValidationError::MissingField { field: "time" });
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title",
            max: MAX_TITLE_LEN,
        });
    }

    let description = fields
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());
    if let Some(d) = description {
        if d.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description",
                max: MAX_DESCRIPTION_LEN,
            });
        }
    }

    let parsed_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidDate {
            value: date.to_string(),
        }
    })?;
    let parsed_time = parse_time(time).ok_or_else(|| ValidationError::InvalidTime {
        value: time.to_string(),
    })?;

    Ok(ValidFields {
        kind: fields.kind,
        title: title.to_string(),
        description: description.map(str::to_string),
        date: parsed_date,
        time: parsed_time,
        frequency: fields.frequency,
    })
}

/// Accepts `HH:MM` from time pickers and `HH:MM:SS` from older clients.
fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

// ═══════════════════════════════════════════
// Store
// ═══════════════════════════════════════════

/// In-memory reminder collection, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ReminderStore {
    reminders: Vec<Reminder>,
}

impl ReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of reminders (demo seed data).
    pub fn with_reminders(reminders: Vec<Reminder>) -> Self {
        Self { reminders }
    }

    /// Validate the form and append a new, active reminder.
    ///
    /// Identical submissions produce distinct reminders.
    pub fn create(&mut self, fields: &ReminderFields) -> Result<Reminder, ValidationError> {
        let valid = validate(fields)?;
        let reminder = Reminder {
            id: Uuid::new_v4(),
            kind: valid.kind,
            title: valid.title,
            description: valid.description,
            date: valid.date,
            time: valid.time,
            frequency: valid.frequency,
            is_active: true,
        };
        tracing::debug!(reminder_id = %reminder.id, kind = %reminder.kind, "Reminder created");
        self.reminders.push(reminder.clone());
        Ok(reminder)
    }

    /// Replace every editable field of the reminder with `id`.
    ///
    /// `is_active` is kept. An unknown id is not an error: the store is
    /// left untouched and `Ok(None)` is returned.
    pub fn update(
        &mut self,
        id: Uuid,
        fields: &ReminderFields,
    ) -> Result<Option<Reminder>, ValidationError> {
        let valid = validate(fields)?;
        let Some(reminder) = self.reminders.iter_mut().find(|r| r.id == id) else {
            tracing::debug!(reminder_id = %id, "Update skipped, reminder not found");
            return Ok(None);
        };

        reminder.kind = valid.kind;
        reminder.title = valid.title;
        reminder.description = valid.description;
        reminder.date = valid.date;
        reminder.time = valid.time;
        reminder.frequency = valid.frequency;

        tracing::debug!(reminder_id = %id, "Reminder updated");
        Ok(Some(reminder.clone()))
    }

    /// Permanently remove a reminder. Returns whether anything was removed.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.id != id);
        let removed = self.reminders.len() != before;
        if removed {
            tracing::debug!(reminder_id = %id, "Reminder deleted");
        }
        removed
    }

    /// Flip `is_active`. Returns the new value, or `None` for an unknown id.
    pub fn toggle_active(&mut self, id: Uuid) -> Option<bool> {
        let reminder = self.reminders.iter_mut().find(|r| r.id == id)?;
        reminder.is_active = !reminder.is_active;
        tracing::debug!(reminder_id = %id, active = reminder.is_active, "Reminder toggled");
        Some(reminder.is_active)
    }

    /// Active reminders due at or after `now`, soonest first, at most `limit`.
    ///
    /// Reminders due at the same instant keep their insertion order.
    pub fn upcoming(&self, now: NaiveDateTime, limit: usize) -> Vec<Reminder> {
        let mut due: Vec<&Reminder> = self
            .reminders
            .iter()
            .filter(|r| r.is_active && r.scheduled_at() >= now)
            .collect();
        due.sort_by_key(|r| r.scheduled_at());
        due.into_iter().take(limit).cloned().collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    /// Every reminder, active or not, in insertion order.
    pub fn list(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }
}
