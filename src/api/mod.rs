//! HTTP API for the browser dashboard.
//!
//! Exposes the session held in `CoreState` as JSON endpoints nested
//! under `/api/`. `api_router()` returns a composable `Router`;
//! `server` owns the bind → spawn → shutdown lifecycle.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, ApiServer};
pub use types::ApiContext;
