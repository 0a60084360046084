// --- File: crates/fleetbook_sheets/src/rows.rs ---
//! Positional mapping between sheet rows and reservations.
//!
//! Column layout, left to right:
//! `[external_ref, start, end, location, resource_id, requester, destination, note]`.

use chrono::NaiveDate;
use fleetbook_common::{span_days, Reservation, ReservationDraft, ResourceId};
use thiserror::Error;
use tracing::{debug, warn};

/// Number of reservation columns (A..H).
pub const COLUMN_COUNT: usize = 8;

/// Format written back to the sheet, e.g. `2024/01/10 (Wed)`.
pub const SHEET_DATE_FORMAT: &str = "%Y/%m/%d (%a)";

const DATE_INPUT_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];

const COL_REF: usize = 0;
const COL_START: usize = 1;
const COL_END: usize = 2;
const COL_LOCATION: usize = 3;
const COL_RESOURCE: usize = 4;
const COL_REQUESTER: usize = 5;
const COL_DESTINATION: usize = 6;
const COL_NOTE: usize = 7;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RowError {
    #[error("unreadable {column} date {value:?}")]
    InvalidDate { column: &'static str, value: String },
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("{start} ~ {end} spans more than {max_days} days")]
    TooLong {
        start: NaiveDate,
        end: NaiveDate,
        max_days: u32,
    },
}

/// Parses a date cell as the sheet renders it.
///
/// Accepts `2024/01/10`, `2024/1/10`, `2024-01-10` and any of those followed by a
/// parenthesised weekday such as `(Wed)` or `（三）`.
pub fn parse_sheet_date(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    let date_part = match trimmed.find(['(', '（']) {
        Some(idx) => trimmed[..idx].trim_end(),
        None => trimmed,
    };
    if date_part.is_empty() {
        return None;
    }
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

pub fn format_sheet_date(date: NaiveDate) -> String {
    date.format(SHEET_DATE_FORMAT).to_string()
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

fn parse_date_cell(row: &[String], idx: usize, column: &'static str) -> Result<NaiveDate, RowError> {
    let value = cell(row, idx);
    parse_sheet_date(value).ok_or_else(|| RowError::InvalidDate {
        column,
        value: value.to_string(),
    })
}

/// Maps one row. `Ok(None)` means the row is incomplete and silently skipped.
fn parse_row(
    row: &[String],
    max_days: u32,
) -> Result<Option<(String, ReservationDraft)>, RowError> {
    if cell(row, COL_START).is_empty()
        || cell(row, COL_END).is_empty()
        || cell(row, COL_REQUESTER).is_empty()
    {
        return Ok(None);
    }

    let start_date = parse_date_cell(row, COL_START, "start")?;
    let end_date = parse_date_cell(row, COL_END, "end")?;
    if end_date < start_date {
        return Err(RowError::EndBeforeStart {
            start: start_date,
            end: end_date,
        });
    }
    if span_days(start_date, end_date) > i64::from(max_days) {
        return Err(RowError::TooLong {
            start: start_date,
            end: end_date,
            max_days,
        });
    }

    let note = Some(cell(row, COL_NOTE))
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let draft = ReservationDraft {
        start_date,
        end_date,
        resource_id: ResourceId::new(cell(row, COL_RESOURCE)),
        location: cell(row, COL_LOCATION).to_string(),
        requester: cell(row, COL_REQUESTER).to_string(),
        destination: cell(row, COL_DESTINATION).to_string(),
        note,
    };
    Ok(Some((cell(row, COL_REF).to_string(), draft)))
}

/// Maps the raw value grid to reservations.
///
/// Ids are assigned in order over the rows that survive filtering. Rows longer
/// than `max_days` are dropped like unreadable ones.
pub fn parse_rows(rows: &[Vec<String>], max_days: u32) -> Vec<Reservation> {
    let mut reservations = Vec::with_capacity(rows.len());
    for (offset, row) in rows.iter().enumerate() {
        match parse_row(row, max_days) {
            Ok(Some((external_ref, draft))) => {
                let id = reservations.len().to_string();
                reservations.push(Reservation::from_draft(draft, id, external_ref));
            }
            Ok(None) => debug!(offset, "skipping incomplete sheet row"),
            Err(reason) => warn!(offset, "skipping sheet row: {}", reason),
        }
    }
    reservations
}

/// The exact cell values written for a new reservation.
pub fn row_payload(draft: &ReservationDraft, existing_ref: &str) -> Vec<String> {
    vec![
        existing_ref.to_string(),
        format_sheet_date(draft.start_date),
        format_sheet_date(draft.end_date),
        draft.location.clone(),
        draft.resource_id.to_string(),
        draft.requester.clone(),
        draft.destination.clone(),
        draft.note.clone().unwrap_or_default(),
    ]
}

/// Target row for the next write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSlot {
    /// 1-based sheet row number.
    pub row_number: u32,
    pub external_ref: String,
}

/// Picks the first row whose start cell is blank, keeping its pre-filled
/// sequence value, or the row after the last one returned.
pub fn find_write_slot(rows: &[Vec<String>], first_data_row: u32) -> WriteSlot {
    let position = rows.iter().position(|row| cell(row, COL_START).is_empty());
    match position {
        Some(idx) => WriteSlot {
            row_number: first_data_row + idx as u32,
            external_ref: cell(&rows[idx], COL_REF).to_string(),
        },
        None => WriteSlot {
            row_number: first_data_row + rows.len() as u32,
            external_ref: String::new(),
        },
    }
}
