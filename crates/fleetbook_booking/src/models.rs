// --- File: crates/fleetbook_booking/src/models.rs ---
// Request and response bodies of the booking API.

use chrono::NaiveDate;
use fleetbook_common::{Reservation, ResourceId};
use fleetbook_config::GroupingPolicy;
use serde::{Deserialize, Serialize};

use crate::fleet::{Region, Vehicle};
use crate::logic::{DateGroup, RegionAvailability, ResourceAvailability};

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[derive(Deserialize, Debug, Default)]
pub struct BookingsQuery {
    /// Browse date (YYYY-MM-DD). Defaults to today.
    pub date: Option<NaiveDate>,
    /// Overrides the configured `hide_expired` flag.
    pub hide_expired: Option<bool>,
    /// Overrides the configured grouping policy.
    pub policy: Option<GroupingPolicy>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Serialize, Debug)]
pub struct BookingsResponse {
    pub date: NaiveDate,
    pub policy: GroupingPolicy,
    /// Date the expiry filter compared against, when it was applied.
    pub hidden_before: Option<NaiveDate>,
    pub groups: Vec<DateGroup>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[derive(Deserialize, Debug, Default)]
pub struct AvailabilityQuery {
    pub date: Option<NaiveDate>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Serialize, Debug)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub available: Vec<ResourceId>,
    pub vehicles: Vec<ResourceAvailability>,
    pub regions: Vec<RegionAvailability>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Serialize, Debug)]
pub struct VehiclesResponse {
    pub vehicles: Vec<Vehicle>,
    pub regions: Vec<Region>,
    pub locations: Vec<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[derive(Deserialize, Debug, Default)]
pub struct CalendarQuery {
    /// Month as `YYYY-MM`. Defaults to the current month.
    pub month: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Serialize, Debug)]
pub struct VehicleCalendarResponse {
    pub vehicle: Vehicle,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub booked_days: Vec<NaiveDate>,
}

/// Booking form submission. Every field is optional on the wire so missing
/// ones surface as validation messages instead of a body rejection.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Deserialize, Debug, Default, Clone)]
pub struct CreateBookingRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub resource_id: Option<String>,
    pub location: Option<String>,
    pub requester: Option<String>,
    pub destination: Option<String>,
    pub note: Option<String>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Serialize, Debug)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub reservation: Reservation,
    pub row_number: u32,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Loading,
    Ready,
    Failed,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Serialize, Debug)]
pub struct RefreshResponse {
    pub status: SessionStatus,
    pub reservations: usize,
}
