// --- File: crates/fleetbook_booking/src/validation.rs ---
//! Turns a raw booking submission into a [`ReservationDraft`].

use fleetbook_common::{span_days, ReservationDraft, ResourceId};

use crate::fleet::Fleet;
use crate::logic::BookingError;
use crate::models::CreateBookingRequest;

fn required(value: Option<String>, field: &str) -> Result<String, BookingError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BookingError::ValidationFailed(format!("{field} is required"))),
    }
}

/// Checks required fields, the date order, the length and the vehicle.
///
/// The location falls back to the vehicle's home location; an explicit one
/// must be one of the configured locations.
pub fn validate_request(
    request: CreateBookingRequest,
    fleet: &Fleet,
    max_days: u32,
) -> Result<ReservationDraft, BookingError> {
    let start_date = request
        .start_date
        .ok_or_else(|| BookingError::ValidationFailed("start_date is required".to_string()))?;
    let end_date = request
        .end_date
        .ok_or_else(|| BookingError::ValidationFailed("end_date is required".to_string()))?;
    if end_date < start_date {
        return Err(BookingError::ValidationFailed(format!(
            "end_date {end_date} is before start_date {start_date}"
        )));
    }
    if span_days(start_date, end_date) > i64::from(max_days) {
        return Err(BookingError::ValidationFailed(format!(
            "bookings are limited to {max_days} days"
        )));
    }

    let resource_id = ResourceId::new(required(request.resource_id, "resource_id")?);
    let vehicle = fleet
        .get(&resource_id)
        .filter(|v| v.active)
        .ok_or_else(|| BookingError::ValidationFailed(format!("unknown vehicle {resource_id}")))?;

    let requester = required(request.requester, "requester")?;
    let destination = required(request.destination, "destination")?;

    let location = match request.location.map(|l| l.trim().to_string()) {
        Some(l) if !l.is_empty() => {
            if !fleet.locations().iter().any(|known| *known == l) {
                return Err(BookingError::ValidationFailed(format!("unknown location {l}")));
            }
            l
        }
        _ => vehicle.location.clone(),
    };

    let note = request
        .note
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    Ok(ReservationDraft {
        start_date,
        end_date,
        resource_id,
        location,
        requester,
        destination,
        note,
    })
}
