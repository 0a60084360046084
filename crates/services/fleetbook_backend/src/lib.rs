// --- File: crates/services/fleetbook_backend/src/lib.rs ---
use axum::{routing::get, Router};
use fleetbook_booking::{routes::routes, BookingState};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod service_factory;

/// The full HTTP surface: the booking API nested under `/api`.
pub fn app(state: Arc<BookingState>) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the fleetbook API!" }))
        .merge(routes(state));

    Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
}
