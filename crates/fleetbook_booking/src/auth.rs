// --- File: crates/fleetbook_booking/src/auth.rs ---

use axum::http::HeaderMap;
use constant_time_eq::constant_time_eq;
use fleetbook_common::{config_error, FleetbookError};
use fleetbook_config::BookingConfig;
use tracing::{info, warn};

use crate::logic::BookingError;

pub const BOOKING_PASSWORD_HEADER: &str = "X-Booking-Password";

/// Checks the shared booking password carried in [`BOOKING_PASSWORD_HEADER`].
///
/// An unset password on the server side is a configuration error, not an
/// open door.
pub fn verify_booking_password(
    config: &BookingConfig,
    headers: &HeaderMap,
) -> Result<(), FleetbookError> {
    let expected = match config.password.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => {
            warn!("booking password is not configured, rejecting submission");
            return Err(config_error("booking password is not configured"));
        }
    };

    let provided = headers
        .get(BOOKING_PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(given) if constant_time_eq(given.as_bytes(), expected.as_bytes()) => Ok(()),
        Some(_) => {
            info!("booking rejected: wrong password");
            Err(BookingError::Unauthorized("wrong booking password".to_string()).into())
        }
        None => {
            info!("booking rejected: missing {} header", BOOKING_PASSWORD_HEADER);
            Err(BookingError::Unauthorized(format!("missing {BOOKING_PASSWORD_HEADER} header")).into())
        }
    }
}
