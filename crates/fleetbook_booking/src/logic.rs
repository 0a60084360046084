// --- File: crates/fleetbook_booking/src/logic.rs ---
//! Availability, conflict and grouping rules over a loaded reservation list.
//!
//! Everything here works on calendar days (`NaiveDate`); callers convert
//! timestamps to the local day before calling in, which is the "normalize to
//! midnight" step. All ranges are inclusive on both ends.

use chrono::NaiveDate;
use fleetbook_common::{
    conflict, external_service_error, not_found, validation_error, FleetbookError, Reservation,
    ResourceId, StoreError,
};
use fleetbook_config::GroupingPolicy;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use thiserror::Error;

use crate::fleet::Fleet;

// --- Error Handling ---
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Failed to load reservations: {0}")]
    FetchFailed(String),
    #[error("Reservations are still loading")]
    Loading,
    #[error("{0}")]
    ValidationFailed(String),
    #[error("Vehicle {resource} is not available for the selected dates (booking #{external_ref}, {start} ~ {end})")]
    Conflict {
        resource: ResourceId,
        external_ref: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("Failed to save booking: {0}")]
    WriteFailed(String),
    #[error("Spreadsheet authorization required: {0}")]
    AuthRequired(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Unknown vehicle {0}")]
    UnknownVehicle(ResourceId),
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::FetchFailed(msg) => BookingError::FetchFailed(msg),
            StoreError::WriteFailed(msg) => BookingError::WriteFailed(msg),
            StoreError::AuthRequired(msg) => BookingError::AuthRequired(msg),
        }
    }
}

impl From<BookingError> for FleetbookError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::FetchFailed(_) | BookingError::Loading | BookingError::WriteFailed(_) => {
                external_service_error("spreadsheet", err)
            }
            BookingError::ValidationFailed(msg) => validation_error(msg),
            BookingError::Conflict { .. } => conflict(err),
            BookingError::AuthRequired(_) | BookingError::Unauthorized(_) => {
                FleetbookError::AuthError(err.to_string())
            }
            BookingError::UnknownVehicle(_) => not_found(err),
        }
    }
}

// --- Availability ---

/// Resources from `all` with no reservation covering `on`, in the order of `all`.
pub fn available_resources(
    all: &[ResourceId],
    reservations: &[Reservation],
    on: NaiveDate,
) -> Vec<ResourceId> {
    let busy: HashSet<&ResourceId> = reservations
        .iter()
        .filter(|r| r.occupies(on))
        .map(|r| &r.resource_id)
        .collect();
    all.iter().filter(|id| !busy.contains(id)).cloned().collect()
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResourceAvailability {
    pub resource_id: ResourceId,
    pub label: String,
    pub location: String,
    pub region: String,
    pub color: String,
    pub available: bool,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegionAvailability {
    pub region: String,
    pub color: String,
    pub resources: Vec<ResourceId>,
    pub available: Vec<ResourceId>,
    pub has_available: bool,
}

/// Every active vehicle with its free/occupied flag for `on`.
pub fn fleet_availability(
    fleet: &Fleet,
    reservations: &[Reservation],
    on: NaiveDate,
) -> Vec<ResourceAvailability> {
    let free: HashSet<ResourceId> = available_resources(&fleet.active_ids(), reservations, on)
        .into_iter()
        .collect();
    fleet
        .active()
        .map(|v| ResourceAvailability {
            resource_id: v.id.clone(),
            label: v.label.clone(),
            location: v.location.clone(),
            region: v.region.clone(),
            color: v.color.clone(),
            available: free.contains(&v.id),
        })
        .collect()
}

/// Per-region summary for `on`, in region configuration order.
pub fn region_availability(
    fleet: &Fleet,
    reservations: &[Reservation],
    on: NaiveDate,
) -> Vec<RegionAvailability> {
    fleet
        .regions()
        .iter()
        .map(|region| {
            let resources: Vec<ResourceId> = fleet
                .active_in_region(&region.name)
                .map(|v| v.id.clone())
                .collect();
            let available = available_resources(&resources, reservations, on);
            RegionAvailability {
                region: region.name.clone(),
                color: region.color.clone(),
                has_available: !available.is_empty(),
                resources,
                available,
            }
        })
        .collect()
}

/// Days in `[from, to]` on which `resource` is reserved, ascending.
pub fn booked_days(
    resource: &ResourceId,
    reservations: &[Reservation],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<NaiveDate> {
    let mut days = BTreeSet::new();
    for r in reservations
        .iter()
        .filter(|r| &r.resource_id == resource && r.overlaps(from, to))
    {
        let first = r.start_date.max(from);
        let last = r.end_date.min(to);
        days.extend(first.iter_days().take_while(|d| *d <= last));
    }
    days.into_iter().collect()
}

// --- Conflict ---

/// First reservation of `resource` whose range intersects `[start, end]`.
///
/// Touching ranges count: a vehicle returned on a day cannot be taken out
/// again that same day.
pub fn find_conflict<'a>(
    resource: &ResourceId,
    start: NaiveDate,
    end: NaiveDate,
    reservations: &'a [Reservation],
) -> Option<&'a Reservation> {
    reservations
        .iter()
        .find(|r| &r.resource_id == resource && r.overlaps(start, end))
}

pub fn has_conflict(
    resource: &ResourceId,
    start: NaiveDate,
    end: NaiveDate,
    reservations: &[Reservation],
) -> bool {
    find_conflict(resource, start, end, reservations).is_some()
}

// --- Grouping & expiry ---

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub reservations: Vec<Reservation>,
}

/// Groups reservations by day, ascending. Within a day, input order is kept.
pub fn group_by_date(reservations: &[Reservation], policy: GroupingPolicy) -> Vec<DateGroup> {
    let mut grouped: BTreeMap<NaiveDate, Vec<Reservation>> = BTreeMap::new();
    for r in reservations {
        match policy {
            GroupingPolicy::ExpandDays => {
                for day in r.days() {
                    grouped.entry(day).or_default().push(r.clone());
                }
            }
            GroupingPolicy::StartDate => grouped.entry(r.start_date).or_default().push(r.clone()),
        }
    }
    grouped
        .into_iter()
        .map(|(date, reservations)| DateGroup { date, reservations })
        .collect()
}

/// Each distinct reservation (by id) once, in first-seen order.
pub fn flatten_groups(groups: &[DateGroup]) -> Vec<Reservation> {
    let mut seen = HashSet::new();
    groups
        .iter()
        .flat_map(|g| g.reservations.iter())
        .filter(|r| seen.insert(r.id.as_str()))
        .cloned()
        .collect()
}

pub fn is_expired(reservation: &Reservation, reference: NaiveDate) -> bool {
    reservation.end_date < reference
}

/// Drops what lies before `reference`.
///
/// With [`GroupingPolicy::ExpandDays`] whole days before the reference go;
/// with [`GroupingPolicy::StartDate`] expired reservations go and emptied
/// days with them.
pub fn hide_expired(
    groups: Vec<DateGroup>,
    policy: GroupingPolicy,
    reference: NaiveDate,
) -> Vec<DateGroup> {
    match policy {
        GroupingPolicy::ExpandDays => groups.into_iter().filter(|g| g.date >= reference).collect(),
        GroupingPolicy::StartDate => groups
            .into_iter()
            .filter_map(|mut g| {
                g.reservations.retain(|r| !is_expired(r, reference));
                (!g.reservations.is_empty()).then_some(g)
            })
            .collect(),
    }
}
