use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ReminderFrequency, ReminderKind};

/// A stored reminder. `title`, `date` and `time` are guaranteed present
/// because the only way in is through validated [`ReminderFields`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub frequency: ReminderFrequency,
    pub is_active: bool,
}

impl Reminder {
    /// Date and time combined into the instant the reminder is due.
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Raw form input for creating or editing a reminder.
///
/// Everything arrives as text so that an empty field can be reported as
/// a validation failure instead of a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderFields {
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub title: String,
    pub description: Option<String>,
    pub date: String, // YYYY-MM-DD
    pub time: String, // HH:MM
    pub frequency: ReminderFrequency,
}
