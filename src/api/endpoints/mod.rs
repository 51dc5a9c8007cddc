//! API endpoint handlers.
//!
//! Each module corresponds to a dashboard card or feature. Handlers
//! delegate to `CoreState`; none of them own state.

pub mod alerts;
pub mod health;
pub mod patients;
pub mod reminders;
pub mod vitals;
