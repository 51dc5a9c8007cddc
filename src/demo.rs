//! Seed data for a fresh dashboard session. Nothing is persisted, so every
//! session starts from these.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::models::{
    Patient, PatientStatus, PatientVitals, Reminder, ReminderFrequency, ReminderKind,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

/// Starter reminders shown to a new patient session.
pub fn reminders() -> Vec<Reminder> {
    vec![
        Reminder {
            id: Uuid::new_v4(),
            kind: ReminderKind::Checkup,
            title: "Monthly Checkup".into(),
            description: Some("Regular prenatal checkup with Dr. Smith".into()),
            date: date(2025, 11, 15),
            time: time(10, 0),
            frequency: ReminderFrequency::Monthly,
            is_active: true,
        },
        Reminder {
            id: Uuid::new_v4(),
            kind: ReminderKind::Medicine,
            title: "Prenatal Vitamins".into(),
            description: Some("Take daily prenatal vitamin supplement".into()),
            date: date(2025, 11, 9),
            time: time(9, 0),
            frequency: ReminderFrequency::Daily,
            is_active: true,
        },
        Reminder {
            id: Uuid::new_v4(),
            kind: ReminderKind::Appointment,
            title: "Ultrasound Appointment".into(),
            description: Some("20-week anatomy scan".into()),
            date: date(2025, 11, 20),
            time: time(14, 30),
            frequency: ReminderFrequency::Once,
            is_active: true,
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn patient(
    id: &str,
    name: &str,
    age: u8,
    weeks: u8,
    last_visit: NaiveDate,
    next_appointment: NaiveDate,
    status: PatientStatus,
    weight_kg: f64,
    blood_pressure: &str,
    heart_rate: u16,
    emotion_score: u8,
) -> Patient {
    Patient {
        id: id.into(),
        name: name.into(),
        age,
        weeks,
        last_visit,
        next_appointment,
        status,
        vitals: PatientVitals {
            weight_kg,
            blood_pressure: blood_pressure.into(),
            heart_rate,
            emotion_score,
        },
    }
}

/// Clinician roster for the doctor dashboard.
pub fn patients() -> Vec<Patient> {
    use PatientStatus::*;
    vec![
        patient("1", "Sarah Johnson", 28, 24, date(2025, 10, 28), date(2025, 11, 11), Critical, 65.0, "121/81", 75, 92),
        patient("2", "Emily Chen", 32, 32, date(2025, 10, 25), date(2025, 11, 8), Monitor, 72.0, "135/88", 82, 75),
        patient("3", "Maria Garcia", 26, 28, date(2025, 10, 30), date(2025, 11, 13), Healthy, 68.0, "118/76", 72, 88),
        patient("4", "Lisa Anderson", 35, 18, date(2025, 10, 27), date(2025, 11, 10), Critical, 62.0, "142/95", 88, 65),
        patient("5", "Jennifer Martinez", 29, 20, date(2025, 10, 29), date(2025, 11, 12), Healthy, 64.0, "120/80", 76, 90),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_reminders_are_active_with_unique_ids() {
        let seeded = reminders();
        assert_eq!(seeded.len(), 3);
        assert!(seeded.iter().all(|r| r.is_active));
        assert_ne!(seeded[0].id, seeded[1].id);
        assert_ne!(seeded[1].id, seeded[2].id);
    }

    #[test]
    fn seed_roster_has_five_patients() {
        let roster = patients();
        assert_eq!(roster.len(), 5);
        assert_eq!(roster.iter().filter(|p| p.is_critical()).count(), 2);
    }
}
