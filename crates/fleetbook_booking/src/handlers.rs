// File: crates/fleetbook_booking/src/handlers.rs
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Json, Response},
};
use chrono::{Datelike, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use fleetbook_common::{handle_json_result, log_error, FleetbookError, ResourceId};
use fleetbook_config::{AppConfig, ExpiryReference};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::verify_booking_password;
use crate::fleet::Fleet;
use crate::logic::{
    available_resources, booked_days, fleet_availability, group_by_date, hide_expired,
    region_availability, BookingError,
};
use crate::models::{
    AvailabilityQuery, AvailabilityResponse, BookingResponse, BookingsQuery, BookingsResponse,
    CalendarQuery, CreateBookingRequest, RefreshResponse, VehicleCalendarResponse,
    VehiclesResponse,
};
use crate::session::BookingSession;
use crate::validation::validate_request;

// Shared state needed by the booking handlers
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub fleet: Arc<Fleet>,
    pub session: Arc<BookingSession>,
}

impl BookingState {
    /// The current calendar day in the configured time zone.
    pub fn today(&self) -> NaiveDate {
        let tz = self
            .config
            .booking
            .time_zone
            .parse::<Tz>()
            .unwrap_or_else(|_| {
                warn!(
                    "unknown time zone {:?}, using Asia/Taipei",
                    self.config.booking.time_zone
                );
                Tz::Asia__Taipei
            });
        Utc::now().with_timezone(&tz).date_naive()
    }
}

/// Reservations grouped by date, optionally without the expired ones.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/bookings",
    params(BookingsQuery),
    responses(
        (status = 200, description = "Reservations grouped by date", body = BookingsResponse),
        (status = 502, description = "Reservation list could not be loaded")
    ),
    tag = "Booking"
))]
pub async fn get_bookings_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<BookingsResponse>, FleetbookError> {
    let booking = &state.config.booking;
    let today = state.today();
    let date = query.date.unwrap_or(today);
    let policy = query.policy.unwrap_or(booking.grouping_policy);

    let groups = state
        .session
        .read(|reservations| group_by_date(reservations, policy))
        .await?;

    let hidden_before = query
        .hide_expired
        .unwrap_or(booking.hide_expired)
        .then_some(match booking.expiry_reference {
            ExpiryReference::Today => today,
            ExpiryReference::SelectedDate => date,
        });
    let groups = match hidden_before {
        Some(reference) => hide_expired(groups, policy, reference),
        None => groups,
    };

    Ok(Json(BookingsResponse {
        date,
        policy,
        hidden_before,
        groups,
    }))
}

/// Which vehicles are free on a day, per vehicle and per region.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Vehicle availability for the day", body = AvailabilityResponse),
        (status = 502, description = "Reservation list could not be loaded")
    ),
    tag = "Booking"
))]
pub async fn get_availability_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, Response> {
    let date = query.date.unwrap_or_else(|| state.today());
    let fleet = &state.fleet;

    let result = state
        .session
        .read(|reservations| AvailabilityResponse {
            date,
            available: available_resources(&fleet.active_ids(), reservations, date),
            vehicles: fleet_availability(fleet, reservations, date),
            regions: region_availability(fleet, reservations, date),
        })
        .await
        .map_err(FleetbookError::from);
    handle_json_result(result)
}

/// Fleet reference data: vehicles, regions and locations.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/vehicles",
    responses((status = 200, description = "Fleet reference data", body = VehiclesResponse)),
    tag = "Booking"
))]
pub async fn get_vehicles_handler(State(state): State<Arc<BookingState>>) -> Json<VehiclesResponse> {
    Json(VehiclesResponse {
        vehicles: state.fleet.vehicles().to_vec(),
        regions: state.fleet.regions().to_vec(),
        locations: state.fleet.locations().to_vec(),
    })
}

fn month_bounds(month: &str) -> Result<(NaiveDate, NaiveDate), BookingError> {
    let invalid = || BookingError::ValidationFailed(format!("invalid month {month:?} (YYYY-MM)"));
    let first = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").map_err(|_| invalid())?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;
    Ok((first, last))
}

/// Days of a month on which one vehicle is booked.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/vehicles/{id}/calendar",
    params(
        ("id" = String, Path, description = "Vehicle plate, e.g. BJK-0596"),
        CalendarQuery
    ),
    responses(
        (status = 200, description = "Booked days of the vehicle", body = VehicleCalendarResponse),
        (status = 400, description = "Invalid month"),
        (status = 404, description = "Unknown vehicle")
    ),
    tag = "Booking"
))]
pub async fn get_vehicle_calendar_handler(
    State(state): State<Arc<BookingState>>,
    Path(id): Path<String>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<VehicleCalendarResponse>, FleetbookError> {
    let id = ResourceId::new(id);
    let vehicle = state
        .fleet
        .get(&id)
        .cloned()
        .ok_or_else(|| BookingError::UnknownVehicle(id.clone()))?;

    let (from, to) = match query.month.as_deref() {
        Some(month) => month_bounds(month)?,
        None => {
            let today = state.today();
            month_bounds(&format!("{}-{:02}", today.year(), today.month()))?
        }
    };

    let booked_days = state
        .session
        .read(|reservations| booked_days(&id, reservations, from, to))
        .await?;

    Ok(Json(VehicleCalendarResponse {
        vehicle,
        from,
        to,
        booked_days,
    }))
}

/// Books a vehicle. Requires the shared booking password.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    params(("X-Booking-Password" = String, Header, description = "Shared booking password")),
    responses(
        (status = 201, description = "Booking written to the sheet", body = BookingResponse),
        (status = 400, description = "Missing field, bad dates or unknown vehicle"),
        (status = 401, description = "Wrong or missing booking password"),
        (status = 409, description = "Vehicle already booked in that range"),
        (status = 502, description = "Sheet write failed")
    ),
    tag = "Booking"
))]
pub async fn create_booking_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), FleetbookError> {
    verify_booking_password(&state.config.booking, &headers)?;
    let draft = validate_request(request, &state.fleet, state.config.booking.max_days)?;

    let (reservation, appended) = state.session.create(draft).await.inspect_err(|e| match e {
        BookingError::Conflict { .. } | BookingError::ValidationFailed(_) => {
            info!("booking refused: {}", e)
        }
        _ => log_error(e, "booking failed"),
    })?;

    let message = format!(
        "{} booked {} ~ {}",
        reservation.resource_id, reservation.start_date, reservation.end_date
    );
    info!("{} (row {})", message, appended.row_number);
    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            message,
            reservation,
            row_number: appended.row_number,
        }),
    ))
}

/// Reloads the reservation list from the sheet.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/bookings/refresh",
    responses(
        (status = 200, description = "Reservation list reloaded", body = RefreshResponse),
        (status = 502, description = "Reload failed")
    ),
    tag = "Booking"
))]
pub async fn refresh_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<RefreshResponse>, FleetbookError> {
    let reservations = state.session.reload().await.inspect_err(|e| log_error(e, "reload failed"))?;
    Ok(Json(RefreshResponse {
        status: state.session.status().await,
        reservations,
    }))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/bookings/{id}",
    params(("id" = String, Path, description = "Reservation id")),
    responses((status = 501, description = "Editing bookings is not supported")),
    tag = "Booking"
))]
pub async fn update_booking_handler(Path(id): Path<String>) -> FleetbookError {
    FleetbookError::NotImplemented(format!("updating booking {id}"))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/bookings/{id}",
    params(("id" = String, Path, description = "Reservation id")),
    responses((status = 501, description = "Deleting bookings is not supported")),
    tag = "Booking"
))]
pub async fn delete_booking_handler(Path(id): Path<String>) -> FleetbookError {
    FleetbookError::NotImplemented(format!("deleting booking {id}"))
}
