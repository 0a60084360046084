// --- File: crates/fleetbook_common/src/models.rs ---

// Records shared by the reservation source and the booking core.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a bookable vehicle (its plate, e.g. `BJK-0596`).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Number of calendar days in `[start, end]`, counting both ends.
pub fn span_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// A booked, inclusive date range for one vehicle.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Position in the loaded set. Not stable across reloads.
    pub id: String,
    /// Sequence value shown in the sheet's first column.
    pub external_ref: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub resource_id: ResourceId,
    /// Home location of the vehicle at booking time.
    pub location: String,
    pub requester: String,
    pub destination: String,
    pub note: Option<String>,
}

impl Reservation {
    /// Whether `day` falls inside `[start_date, end_date]`.
    pub fn occupies(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Inclusive interval intersection with `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end_date && end >= self.start_date
    }

    /// Every calendar day of the reservation, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |day| *day <= self.end_date)
    }

    pub fn from_draft(draft: ReservationDraft, id: String, external_ref: String) -> Self {
        Self {
            id,
            external_ref,
            start_date: draft.start_date,
            end_date: draft.end_date,
            resource_id: draft.resource_id,
            location: draft.location,
            requester: draft.requester,
            destination: draft.destination,
            note: draft.note,
        }
    }
}

/// A validated reservation that has not been written yet.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub resource_id: ResourceId,
    pub location: String,
    pub requester: String,
    pub destination: String,
    pub note: Option<String>,
}

impl ReservationDraft {
    pub fn span_days(&self) -> i64 {
        span_days(self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reservation(start: NaiveDate, end: NaiveDate) -> Reservation {
        Reservation {
            id: "0".into(),
            external_ref: "1".into(),
            start_date: start,
            end_date: end,
            resource_id: "A".into(),
            location: "HQ".into(),
            requester: "Lin".into(),
            destination: "Tainan".into(),
            note: None,
        }
    }

    #[test]
    fn days_cover_inclusive_span() {
        let r = reservation(date(2024, 1, 30), date(2024, 2, 2));
        let days: Vec<_> = r.days().collect();
        assert_eq!(
            days,
            vec![date(2024, 1, 30), date(2024, 1, 31), date(2024, 2, 1), date(2024, 2, 2)]
        );
        assert_eq!(span_days(r.start_date, r.end_date), 4);
        assert_eq!(span_days(date(2024, 1, 30), date(2024, 1, 30)), 1);
    }

    #[test]
    fn occupies_includes_both_ends() {
        let r = reservation(date(2024, 1, 10), date(2024, 1, 12));
        assert!(r.occupies(date(2024, 1, 10)));
        assert!(r.occupies(date(2024, 1, 12)));
        assert!(!r.occupies(date(2024, 1, 13)));
    }

    #[test]
    fn resource_id_serializes_as_plain_string() {
        let id = ResourceId::new("BJK-0596");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"BJK-0596\"");
    }
}
