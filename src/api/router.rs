//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. Layers (outermost → innermost):
//! CORS → access log → handler.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the dashboard API router.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/reminders",
            get(endpoints::reminders::list).post(endpoints::reminders::create),
        )
        .route("/reminders/upcoming", get(endpoints::reminders::upcoming))
        .route(
            "/reminders/:id",
            get(endpoints::reminders::detail)
                .put(endpoints::reminders::update)
                .delete(endpoints::reminders::delete),
        )
        .route("/reminders/:id/toggle", post(endpoints::reminders::toggle))
        .route("/patients", get(endpoints::patients::list))
        .route(
            "/alerts/critical/highlight",
            get(endpoints::alerts::status)
                .post(endpoints::alerts::highlight)
                .delete(endpoints::alerts::cancel),
        )
        .route("/vitals/bmi", get(endpoints::vitals::bmi))
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::audit::log_access));

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
}
