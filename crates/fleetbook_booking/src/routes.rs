// --- File: crates/fleetbook_booking/src/routes.rs ---

use crate::handlers::{
    create_booking_handler, delete_booking_handler, get_availability_handler,
    get_bookings_handler, get_vehicle_calendar_handler, get_vehicles_handler, refresh_handler,
    update_booking_handler, BookingState,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all routes for the booking feature.
/// The backend nests it under `/api`.
pub fn routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route(
            "/bookings",
            get(get_bookings_handler).post(create_booking_handler),
        )
        .route("/bookings/refresh", post(refresh_handler))
        .route(
            "/bookings/{id}",
            put(update_booking_handler).delete(delete_booking_handler),
        )
        .route("/availability", get(get_availability_handler))
        .route("/vehicles", get(get_vehicles_handler))
        .route("/vehicles/{id}/calendar", get(get_vehicle_calendar_handler))
        .with_state(state)
}
