//! Clinician patient roster: name search and status totals.

use serde::{Deserialize, Serialize};

use crate::models::{Patient, PatientStatus};

/// Per-status totals shown above the patient list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub healthy: usize,
    pub monitor: usize,
    pub critical: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PatientRoster {
    patients: Vec<Patient>,
}

impl PatientRoster {
    pub fn new(patients: Vec<Patient>) -> Self {
        Self { patients }
    }

    /// Patients whose name contains `query`, ignoring case, in roster order.
    /// A blank query matches everyone.
    pub fn search(&self, query: &str) -> Vec<Patient> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.patients.clone();
        }
        self.patients
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Totals over the whole roster, independent of any search.
    pub fn status_counts(&self) -> StatusCounts {
        self.patients
            .iter()
            .fold(StatusCounts::default(), |mut counts, p| {
                match p.status {
                    PatientStatus::Healthy => counts.healthy += 1,
                    PatientStatus::Monitor => counts.monitor += 1,
                    PatientStatus::Critical => counts.critical += 1,
                }
                counts
            })
    }

    pub fn get(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn all(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

/// First critical patient in display order, if any.
pub fn first_critical(patients: &[Patient]) -> Option<&Patient> {
    patients.iter().find(|p| p.is_critical())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;

    #[test]
    fn search_is_case_insensitive() {
        let roster = PatientRoster::new(demo::patients());
        let hits = roster.search("CHEN");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Emily Chen");
    }

    #[test]
    fn blank_search_returns_everyone_in_order() {
        let roster = PatientRoster::new(demo::patients());
        let all = roster.search("  ");
        assert_eq!(all.len(), roster.len());
        assert_eq!(all[0].id, roster.all()[0].id);
    }

    #[test]
    fn search_without_match_is_empty() {
        let roster = PatientRoster::new(demo::patients());
        assert!(roster.search("zzz").is_empty());
    }

    #[test]
    fn status_counts_cover_full_roster() {
        let roster = PatientRoster::new(demo::patients());
        assert_eq!(
            roster.status_counts(),
            StatusCounts {
                healthy: 2,
                monitor: 1,
                critical: 2,
            }
        );
    }

    #[test]
    fn first_critical_respects_filtered_order() {
        let roster = PatientRoster::new(demo::patients());
        assert_eq!(first_critical(&roster.search("")).unwrap().name, "Sarah Johnson");
        assert_eq!(first_critical(&roster.search("lisa")).unwrap().name, "Lisa Anderson");
        assert!(first_critical(&roster.search("maria")).is_none());
    }

    #[test]
    fn get_by_id() {
        let roster = PatientRoster::new(demo::patients());
        assert_eq!(roster.get("2").unwrap().name, "Emily Chen");
        assert!(roster.get("99").is_none());
        assert!(PatientRoster::default().is_empty());
    }
}
