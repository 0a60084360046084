// File: crates/fleetbook_booking/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::fleet::{Region, Vehicle};
use crate::handlers;
use crate::logic::{DateGroup, RegionAvailability, ResourceAvailability};
use crate::models::{
    AvailabilityResponse, BookingResponse, BookingsResponse, CreateBookingRequest,
    RefreshResponse, SessionStatus, VehicleCalendarResponse, VehiclesResponse,
};
use fleetbook_common::{Reservation, ResourceId};
use fleetbook_config::GroupingPolicy;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_bookings_handler,
        handlers::get_availability_handler,
        handlers::get_vehicles_handler,
        handlers::get_vehicle_calendar_handler,
        handlers::create_booking_handler,
        handlers::refresh_handler,
        handlers::update_booking_handler,
        handlers::delete_booking_handler
    ),
    components(
        schemas(
            ResourceId,
            Reservation,
            GroupingPolicy,
            DateGroup,
            BookingsResponse,
            ResourceAvailability,
            RegionAvailability,
            AvailabilityResponse,
            Vehicle,
            Region,
            VehiclesResponse,
            VehicleCalendarResponse,
            CreateBookingRequest,
            BookingResponse,
            SessionStatus,
            RefreshResponse
        )
    ),
    tags(
        (name = "Booking", description = "Vehicle booking API")
    ),
    servers(
        (url = "/api", description = "Fleetbook API server")
    )
)]
pub struct BookingApiDoc;
