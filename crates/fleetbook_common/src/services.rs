// --- File: crates/fleetbook_common/src/services.rs ---
//! Service abstractions for external collaborators.
//!
//! The booking core talks to the spreadsheet only through [`ReservationStore`],
//! so handlers and the session can be tested against an in-memory store.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

use crate::error::{external_service_error, FleetbookError};
use crate::models::{Reservation, ReservationDraft};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Failure classes every reservation store reports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Reading the reservation list failed.
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    /// Writing a row failed; nothing was recorded locally.
    #[error("write failed: {0}")]
    WriteFailed(String),
    /// The write needs a (fresh) bearer credential.
    #[error("authorization required: {0}")]
    AuthRequired(String),
}

impl From<StoreError> for FleetbookError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AuthRequired(msg) => FleetbookError::AuthError(msg),
            StoreError::FetchFailed(msg) | StoreError::WriteFailed(msg) => {
                external_service_error("reservation store", msg)
            }
        }
    }
}

/// Where a new reservation landed in the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendedRow {
    /// 1-based row number in the sheet.
    pub row_number: u32,
    /// The sequence value already present in that row, if any.
    pub external_ref: String,
}

/// Read and append access to the reservation records.
pub trait ReservationStore: Send + Sync {
    /// Loads every reservation, in store order.
    fn fetch_all(&self) -> BoxFuture<'_, Vec<Reservation>, StoreError>;

    /// Writes one validated reservation and reports where it went.
    fn append(&self, draft: ReservationDraft) -> BoxFuture<'_, AppendedRow, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpStatusCode;

    #[test]
    fn store_errors_map_to_gateway_or_auth_status() {
        let fetch: FleetbookError = StoreError::FetchFailed("503".into()).into();
        let write: FleetbookError = StoreError::WriteFailed("500".into()).into();
        let auth: FleetbookError = StoreError::AuthRequired("expired".into()).into();
        assert_eq!(fetch.status_code(), 502);
        assert_eq!(write.status_code(), 502);
        assert_eq!(auth.status_code(), 401);
    }
}
