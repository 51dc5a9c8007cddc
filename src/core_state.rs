//! Dashboard session state.
//!
//! `CoreState` is the single object behind every handler: it owns the
//! reminder store, the patient roster and the critical-highlight
//! controller. Mutations go through its methods only. Wrapped in `Arc`
//! at startup and shared with the HTTP layer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;
use crate::demo;
use crate::highlight::{
    HighlightController, HighlightError, HighlightPhase, ScrollRequest, Viewport,
};
use crate::models::{Patient, Reminder, ReminderFields};
use crate::patients::{PatientRoster, StatusCounts};
use crate::reminders::{ReminderStore, ValidationError};

// ═══════════════════════════════════════════════════════════
// Focus tracking — viewport for remote clients
// ═══════════════════════════════════════════════════════════

/// Last scroll request issued by the highlight controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusTarget {
    pub patient_id: String,
    pub scroll: ScrollRequest,
}

/// Records scroll requests so a polling client can apply them.
#[derive(Debug, Default)]
pub struct FocusTracker {
    last: Mutex<Option<FocusTarget>>,
}

impl FocusTracker {
    pub fn current(&self) -> Option<FocusTarget> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Generation of the highlight cycle the dashboard asked for, if any.
type ActiveCycle = Mutex<Option<u64>>;

fn lock_cycle(cycle: &ActiveCycle) -> MutexGuard<'_, Option<u64>> {
    cycle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Completion callback body. A cycle that was replaced before its timer
/// reported back must not clear the state of the one that replaced it.
fn finish_highlight_cycle(cycle: &ActiveCycle, focus: &FocusTracker, generation: u64) {
    let mut active = lock_cycle(cycle);
    if *active != Some(generation) {
        tracing::debug!(generation, "Ignoring completion of replaced highlight cycle");
        return;
    }
    *active = None;
    focus.clear();
}

impl Viewport for FocusTracker {
    fn scroll_into_view(&self, patient_id: &str, request: ScrollRequest) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(FocusTarget {
            patient_id: patient_id.to_string(),
            scroll: request,
        });
    }
}

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

/// What the doctor dashboard needs to draw the critical-alert highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightStatus {
    pub requested: bool,
    pub phase: HighlightPhase,
    pub focused_patient_id: Option<String>,
    pub scroll: Option<ScrollRequest>,
}

pub struct CoreState {
    reminders: RwLock<ReminderStore>,
    roster: PatientRoster,
    highlight: HighlightController,
    /// Set when a highlight is requested, cleared by the controller's
    /// completion callback for that same cycle or by cancellation.
    active_cycle: Arc<ActiveCycle>,
    focus: Arc<FocusTracker>,
    /// Bumped on every successful mutation so clients know to re-render.
    revision: AtomicU64,
    pub upcoming_limit: usize,
}

impl CoreState {
    /// Fresh session seeded with the demo reminders and roster.
    pub fn new() -> Self {
        Self::with_data(demo::reminders(), demo::patients(), config::HIGHLIGHT_DURATION)
    }

    pub fn with_data(
        reminders: Vec<Reminder>,
        patients: Vec<Patient>,
        highlight_duration: Duration,
    ) -> Self {
        let active_cycle = Arc::new(ActiveCycle::default());
        let focus = Arc::new(FocusTracker::default());

        let cycle = Arc::clone(&active_cycle);
        let focus_for_clear = Arc::clone(&focus);
        let highlight = HighlightController::with_duration(
            highlight_duration,
            focus.clone(),
            move |generation| finish_highlight_cycle(&cycle, &focus_for_clear, generation),
        );

        Self {
            reminders: RwLock::new(ReminderStore::with_reminders(reminders)),
            roster: PatientRoster::new(patients),
            highlight,
            active_cycle,
            focus,
            revision: AtomicU64::new(0),
            upcoming_limit: config::UPCOMING_LIMIT,
        }
    }

    // ── Lock helpers ────────────────────────────────────────

    fn read_reminders(&self) -> Result<RwLockReadGuard<'_, ReminderStore>, CoreError> {
        self.reminders.read().map_err(|_| CoreError::LockPoisoned)
    }

    fn write_reminders(&self) -> Result<RwLockWriteGuard<'_, ReminderStore>, CoreError> {
        self.reminders.write().map_err(|_| CoreError::LockPoisoned)
    }

    fn bump_revision(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    // ── Reminders ───────────────────────────────────────────

    pub fn create_reminder(&self, fields: &ReminderFields) -> Result<Reminder, CoreError> {
        let reminder = self.write_reminders()?.create(fields)?;
        self.bump_revision();
        Ok(reminder)
    }

    /// `Ok(None)` when no reminder has that id.
    pub fn update_reminder(
        &self,
        id: Uuid,
        fields: &ReminderFields,
    ) -> Result<Option<Reminder>, CoreError> {
        let updated = self.write_reminders()?.update(id, fields)?;
        if updated.is_some() {
            self.bump_revision();
        }
        Ok(updated)
    }

    pub fn delete_reminder(&self, id: Uuid) -> Result<bool, CoreError> {
        let removed = self.write_reminders()?.delete(id);
        if removed {
            self.bump_revision();
        }
        Ok(removed)
    }

    pub fn toggle_reminder(&self, id: Uuid) -> Result<Option<bool>, CoreError> {
        let toggled = self.write_reminders()?.toggle_active(id);
        if toggled.is_some() {
            self.bump_revision();
        }
        Ok(toggled)
    }

    pub fn get_reminder(&self, id: Uuid) -> Result<Option<Reminder>, CoreError> {
        Ok(self.read_reminders()?.get(id).cloned())
    }

    pub fn list_reminders(&self) -> Result<Vec<Reminder>, CoreError> {
        Ok(self.read_reminders()?.list().to_vec())
    }

    /// The "upcoming" card with the configured limit.
    pub fn upcoming_reminders(&self, now: NaiveDateTime) -> Result<Vec<Reminder>, CoreError> {
        self.upcoming_reminders_limited(now, self.upcoming_limit)
    }

    pub fn upcoming_reminders_limited(
        &self,
        now: NaiveDateTime,
        limit: usize,
    ) -> Result<Vec<Reminder>, CoreError> {
        Ok(self.read_reminders()?.upcoming(now, limit))
    }

    // ── Patients ────────────────────────────────────────────

    pub fn search_patients(&self, query: &str) -> Vec<Patient> {
        self.roster.search(query)
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.roster.status_counts()
    }

    pub fn roster(&self) -> &PatientRoster {
        &self.roster
    }

    // ── Critical highlight ──────────────────────────────────

    /// Highlight the first critical patient among those matching `query`.
    pub fn request_critical_highlight(&self, query: &str) -> Result<Option<String>, CoreError> {
        let visible = self.roster.search(query);
        // Held across the arm so a completing timer sees either the old
        // cycle or the new one, never a half-armed state.
        let mut active = lock_cycle(&self.active_cycle);
        self.focus.clear();
        match self.highlight.arm(&visible) {
            Ok(focused) => {
                *active = Some(self.highlight.generation());
                Ok(focused)
            }
            Err(e) => {
                *active = None;
                Err(e.into())
            }
        }
    }

    pub fn highlight_duration(&self) -> Duration {
        self.highlight.duration()
    }

    pub fn highlight_status(&self) -> HighlightStatus {
        let active = lock_cycle(&self.active_cycle);
        let state = self.highlight.state();
        HighlightStatus {
            requested: active.is_some(),
            phase: state.phase,
            focused_patient_id: state.focused_patient_id,
            scroll: self.focus.current().map(|f| f.scroll),
        }
    }

    /// Cancel a pending highlight. Returns whether one was pending.
    pub fn cancel_highlight(&self) -> bool {
        let mut active = lock_cycle(&self.active_cycle);
        let cancelled = self.highlight.cancel();
        *active = None;
        self.focus.clear();
        cancelled
    }

    /// Release timers before the session is discarded.
    pub fn teardown(&self) {
        let mut active = lock_cycle(&self.active_cycle);
        self.highlight.teardown();
        *active = None;
        self.focus.clear();
        drop(active);
        tracing::info!("Dashboard session torn down");
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from CoreState operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Highlight unavailable: {0}")]
    Highlight(#[from] HighlightError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn fields(title: &str, date: &str) -> ReminderFields {
        ReminderFields {
            title: title.into(),
            date: date.into(),
            time: "09:00".into(),
            ..ReminderFields::default()
        }
    }

    fn empty_state(duration: Duration) -> CoreState {
        CoreState::with_data(Vec::new(), demo::patients(), duration)
    }

    #[test]
    fn new_session_is_seeded() {
        let state = CoreState::new();
        assert_eq!(state.list_reminders().unwrap().len(), 3);
        assert_eq!(state.roster().len(), 5);
        assert!(!state.highlight_status().requested);
    }

    #[test]
    fn seeded_upcoming_is_sorted_and_limited() {
        let state = CoreState::new();
        let upcoming = state.upcoming_reminders(now()).unwrap();
        let titles: Vec<_> = upcoming.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Prenatal Vitamins", "Monthly Checkup", "Ultrasound Appointment"]
        );
    }

    #[test]
    fn mutations_bump_revision() {
        let state = empty_state(Duration::from_secs(7));
        assert_eq!(state.revision(), 0);

        let r = state.create_reminder(&fields("Checkup", "2025-11-15")).unwrap();
        assert_eq!(state.revision(), 1);
        state.toggle_reminder(r.id).unwrap();
        assert_eq!(state.revision(), 2);
        state.update_reminder(r.id, &fields("Scan", "2025-11-16")).unwrap();
        assert_eq!(state.revision(), 3);
        state.delete_reminder(r.id).unwrap();
        assert_eq!(state.revision(), 4);
    }

    #[test]
    fn no_op_mutations_keep_revision() {
        let state = empty_state(Duration::from_secs(7));
        let missing = Uuid::new_v4();
        assert!(!state.delete_reminder(missing).unwrap());
        assert_eq!(state.toggle_reminder(missing).unwrap(), None);
        assert_eq!(state.update_reminder(missing, &fields("X", "2025-11-15")).unwrap(), None);
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn validation_error_passes_through() {
        let state = empty_state(Duration::from_secs(7));
        let err = state.create_reminder(&fields("", "2025-11-15")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MissingField { field: "title" })
        ));
        assert!(state.list_reminders().unwrap().is_empty());
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn highlight_without_runtime_clears_flag() {
        let state = empty_state(Duration::from_secs(7));
        assert!(matches!(
            state.request_critical_highlight(""),
            Err(CoreError::Highlight(HighlightError::NoRuntime))
        ));
        assert!(!state.highlight_status().requested);
    }

    #[tokio::test(start_paused = true)]
    async fn highlight_flag_clears_when_timer_elapses() {
        let state = empty_state(Duration::from_secs(7));

        let focused = state.request_critical_highlight("").unwrap();
        assert_eq!(focused.as_deref(), Some("1"));

        let status = state.highlight_status();
        assert!(status.requested);
        assert_eq!(status.phase, HighlightPhase::Armed);
        assert_eq!(status.scroll, Some(ScrollRequest::CENTERED_SMOOTH));

        tokio::time::sleep(Duration::from_millis(7_100)).await;
        let status = state.highlight_status();
        assert!(!status.requested);
        assert_eq!(status.phase, HighlightPhase::Idle);
        assert_eq!(status.focused_patient_id, None);
        assert_eq!(status.scroll, None);
    }

    #[tokio::test(start_paused = true)]
    async fn highlight_uses_filtered_list() {
        let state = empty_state(Duration::from_secs(7));
        assert_eq!(
            state.request_critical_highlight("anderson").unwrap().as_deref(),
            Some("4")
        );
        assert_eq!(state.request_critical_highlight("garcia").unwrap(), None);
        let status = state.highlight_status();
        assert!(status.requested);
        assert_eq!(status.focused_patient_id, None);
        assert_eq!(status.scroll, None);
    }

    #[tokio::test(start_paused = true)]
    async fn replaced_cycle_completion_keeps_new_highlight() {
        let state = empty_state(Duration::from_secs(7));
        state.request_critical_highlight("").unwrap();
        let replaced = state.highlight.generation();
        state.request_critical_highlight("anderson").unwrap();

        // The first cycle's timer reporting back after the re-arm.
        finish_highlight_cycle(&state.active_cycle, &state.focus, replaced);

        let status = state.highlight_status();
        assert!(status.requested);
        assert_eq!(status.phase, HighlightPhase::Armed);
        assert_eq!(status.focused_patient_id.as_deref(), Some("4"));
        assert_eq!(status.scroll, Some(ScrollRequest::CENTERED_SMOOTH));

        tokio::time::sleep(Duration::from_millis(7_100)).await;
        let status = state.highlight_status();
        assert!(!status.requested);
        assert_eq!(status.scroll, None);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_pending_highlight() {
        let state = empty_state(Duration::from_secs(7));
        state.request_critical_highlight("").unwrap();
        state.teardown();

        let status = state.highlight_status();
        assert!(!status.requested);
        assert_eq!(status.phase, HighlightPhase::Idle);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(state.highlight_status().phase, HighlightPhase::Idle);
    }
}
