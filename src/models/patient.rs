use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::PatientStatus;

/// Latest vitals shown on the patient card. Not interpreted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientVitals {
    pub weight_kg: f64,
    pub blood_pressure: String,
    pub heart_rate: u16,
    pub emotion_score: u8,
}

/// A patient on the clinician's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u8,
    /// Gestational age in weeks.
    pub weeks: u8,
    pub last_visit: NaiveDate,
    pub next_appointment: NaiveDate,
    pub status: PatientStatus,
    pub vitals: PatientVitals,
}

impl Patient {
    pub fn is_critical(&self) -> bool {
        self.status == PatientStatus::Critical
    }

    /// Initials for the avatar bubble ("Sarah Johnson" → "SJ").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(name: &str, status: PatientStatus) -> Patient {
        Patient {
            id: "p1".into(),
            name: name.into(),
            age: 30,
            weeks: 20,
            last_visit: NaiveDate::from_ymd_opt(2025, 10, 28).unwrap(),
            next_appointment: NaiveDate::from_ymd_opt(2025, 11, 11).unwrap(),
            status,
            vitals: PatientVitals {
                weight_kg: 65.0,
                blood_pressure: "120/80".into(),
                heart_rate: 75,
                emotion_score: 90,
            },
        }
    }

    #[test]
    fn critical_flag_follows_status() {
        assert!(patient("A B", PatientStatus::Critical).is_critical());
        assert!(!patient("A B", PatientStatus::Monitor).is_critical());
    }

    #[test]
    fn initials_take_first_letter_of_each_name() {
        assert_eq!(patient("Sarah Johnson", PatientStatus::Healthy).initials(), "SJ");
        assert_eq!(patient("  Maria   de Garcia ", PatientStatus::Healthy).initials(), "MdG");
    }
}
