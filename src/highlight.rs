//! Critical-patient highlight controller.
//!
//! When a clinician asks to see critical alerts, the controller focuses
//! the first critical patient in the visible list, keeps the highlight
//! for a fixed duration, then clears it and notifies the owner.
//!
//! States: `Idle` → `Armed` (timer pending) → `Clearing` (callback
//! running) → `Idle`. At most one timer is ever pending: re-arming aborts
//! the previous one and restarts the full duration. Every arm bumps a
//! generation counter, and a timer only completes if its generation is
//! still current, so an aborted timer that already woke up cannot fire.
//! The callback receives the generation it completes so an owner can
//! ignore a cycle it has already replaced.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config;
use crate::models::Patient;
use crate::patients::first_critical;

// ═══════════════════════════════════════════════════════════
// Viewport collaborator
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBlock {
    Start,
    Center,
    End,
    Nearest,
}

/// How the focused entry should be brought into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollRequest {
    pub const CENTERED_SMOOTH: Self = Self {
        behavior: ScrollBehavior::Smooth,
        block: ScrollBlock::Center,
    };
}

/// Whatever renders the patient list. Scrolling is fire-and-forget: a
/// missing entry is simply not scrolled to.
pub trait Viewport: Send + Sync {
    fn scroll_into_view(&self, patient_id: &str, request: ScrollRequest);
}

// ═══════════════════════════════════════════════════════════
// Controller
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightPhase {
    Idle,
    Armed,
    Clearing,
}

/// Point-in-time view of the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightState {
    pub phase: HighlightPhase,
    pub focused_patient_id: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    #[error("Highlight timer requires a running tokio runtime")]
    NoRuntime,
}

type CompletionCallback = Arc<dyn Fn(u64) + Send + Sync>;

struct Inner {
    phase: HighlightPhase,
    focused: Option<String>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    // Every critical section leaves `Inner` consistent, so a poisoned
    // lock still holds usable state.
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct HighlightController {
    duration: Duration,
    viewport: Arc<dyn Viewport>,
    on_complete: CompletionCallback,
    inner: Arc<Mutex<Inner>>,
}

impl HighlightController {
    /// Controller with the standard highlight duration.
    pub fn new<F>(viewport: Arc<dyn Viewport>, on_complete: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        Self::with_duration(config::HIGHLIGHT_DURATION, viewport, on_complete)
    }

    pub fn with_duration<F>(duration: Duration, viewport: Arc<dyn Viewport>, on_complete: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        Self {
            duration,
            viewport,
            on_complete: Arc::new(on_complete),
            inner: Arc::new(Mutex::new(Inner {
                phase: HighlightPhase::Idle,
                focused: None,
                generation: 0,
                timer: None,
            })),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start (or restart) a highlight cycle over `patients`, in display order.
    ///
    /// Returns the id of the patient that was scrolled to. With no critical
    /// patient the timer still runs so the owner's flag gets cleared.
    pub fn arm(&self, patients: &[Patient]) -> Result<Option<String>, HighlightError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| HighlightError::NoRuntime)?;
        let target = first_critical(patients).map(|p| p.id.clone());
        let deadline = Instant::now() + self.duration;

        {
            let mut inner = lock(&self.inner);
            if let Some(previous) = inner.timer.take() {
                previous.abort();
                tracing::debug!("Pending highlight timer replaced");
            }
            inner.generation = inner.generation.wrapping_add(1);
            inner.phase = HighlightPhase::Armed;
            inner.focused = target.clone();

            let generation = inner.generation;
            let state = Arc::clone(&self.inner);
            let on_complete = Arc::clone(&self.on_complete);
            inner.timer = Some(runtime.spawn(async move {
                tokio::time::sleep_until(deadline).await;
                complete(&state, generation, &on_complete);
            }));
        }

        match &target {
            Some(id) => {
                tracing::info!(patient_id = %id, "Highlighting critical patient");
                self.viewport.scroll_into_view(id, ScrollRequest::CENTERED_SMOOTH);
            }
            None => tracing::info!("Critical highlight armed, no critical patient in view"),
        }

        Ok(target)
    }

    /// Abort any pending timer without invoking the completion callback.
    /// Returns whether a timer was pending.
    pub fn cancel(&self) -> bool {
        let mut inner = lock(&self.inner);
        inner.generation = inner.generation.wrapping_add(1);
        inner.phase = HighlightPhase::Idle;
        inner.focused = None;
        match inner.timer.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Called when the owning view goes away.
    pub fn teardown(&self) {
        if self.cancel() {
            tracing::debug!("Highlight timer cancelled on teardown");
        }
    }

    /// Generation of the most recent arm or cancel.
    pub fn generation(&self) -> u64 {
        lock(&self.inner).generation
    }

    pub fn state(&self) -> HighlightState {
        let inner = lock(&self.inner);
        HighlightState {
            phase: inner.phase,
            focused_patient_id: inner.focused.clone(),
        }
    }
}

impl Drop for HighlightController {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn complete(inner: &Mutex<Inner>, generation: u64, on_complete: &CompletionCallback) {
    {
        let mut guard = lock(inner);
        if guard.generation != generation || guard.phase != HighlightPhase::Armed {
            return;
        }
        guard.phase = HighlightPhase::Clearing;
        guard.timer = None;
    }

    on_complete(generation);

    let mut guard = lock(inner);
    // A re-arm from inside the callback owns the state now.
    if guard.generation == generation {
        guard.phase = HighlightPhase::Idle;
        guard.focused = None;
    }
    tracing::debug!("Critical highlight cleared");
}
