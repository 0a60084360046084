// --- File: crates/fleetbook_sheets/src/service.rs ---
//! Google Sheets implementation of the [`ReservationStore`] trait.

use fleetbook_common::{
    AppendedRow, BoxFuture, Reservation, ReservationDraft, ReservationStore, StoreError,
};
use fleetbook_config::{SheetsConfig, DEFAULT_MAX_DAYS};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::auth::SheetsSession;
use crate::client::{SheetsClient, SheetsError};
use crate::rows::{find_write_slot, parse_rows, row_payload};

/// Reservation store backed by one sheet tab.
pub struct SheetsReservationStore {
    client: SheetsClient,
    session: Arc<SheetsSession>,
    config: SheetsConfig,
    max_days: u32,
    // Held from slot lookup until the row is written.
    write_lock: Mutex<()>,
}

impl SheetsReservationStore {
    pub fn new(client: SheetsClient, session: Arc<SheetsSession>, config: SheetsConfig) -> Self {
        Self {
            client,
            session,
            config,
            max_days: DEFAULT_MAX_DAYS,
            write_lock: Mutex::new(()),
        }
    }

    /// Rows spanning more days than this are dropped on load.
    pub fn with_max_days(mut self, max_days: u32) -> Self {
        self.max_days = max_days;
        self
    }

    async fn load(&self) -> Result<Vec<Reservation>, SheetsError> {
        let rows = self.client.get_values(&self.config.read_range()).await?;
        let reservations = parse_rows(&rows, self.max_days);
        info!(
            "loaded {} reservations from {} sheet rows",
            reservations.len(),
            rows.len()
        );
        Ok(reservations)
    }

    /// Writes `cells`, re-authenticating once if the credential is rejected.
    async fn write_row(&self, range: &str, cells: Vec<String>) -> Result<(), SheetsError> {
        let bearer = self.session.bearer().await?;
        match self.client.update_row(range, cells.clone(), &bearer).await {
            Err(SheetsError::AuthRequired(reason)) => {
                warn!("credential rejected ({}), re-authenticating", reason);
                self.session.invalidate().await;
                let bearer = self.session.bearer().await?;
                self.client.update_row(range, cells, &bearer).await
            }
            other => other,
        }
    }

    async fn write(&self, draft: ReservationDraft) -> Result<AppendedRow, SheetsError> {
        let _guard = self.write_lock.lock().await;
        let rows = self.client.get_values(&self.config.read_range()).await?;
        let slot = find_write_slot(&rows, self.config.first_data_row);
        let range = self.config.row_range(slot.row_number);

        self.write_row(&range, row_payload(&draft, &slot.external_ref))
            .await?;
        info!(
            "booked {} {}..{} into row {}",
            draft.resource_id, draft.start_date, draft.end_date, slot.row_number
        );
        Ok(AppendedRow {
            row_number: slot.row_number,
            external_ref: slot.external_ref,
        })
    }
}

fn write_failure(err: SheetsError) -> StoreError {
    match err {
        SheetsError::AuthRequired(msg) | SheetsError::Auth(msg) => StoreError::AuthRequired(msg),
        other => StoreError::WriteFailed(other.to_string()),
    }
}

impl ReservationStore for SheetsReservationStore {
    fn fetch_all(&self) -> BoxFuture<'_, Vec<Reservation>, StoreError> {
        Box::pin(async move {
            self.load()
                .await
                .map_err(|e| StoreError::FetchFailed(e.to_string()))
        })
    }

    fn append(&self, draft: ReservationDraft) -> BoxFuture<'_, AppendedRow, StoreError> {
        Box::pin(async move { self.write(draft).await.map_err(write_failure) })
    }
}
