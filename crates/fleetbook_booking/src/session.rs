// --- File: crates/fleetbook_booking/src/session.rs ---
//! The loaded reservation list and its load state.

use fleetbook_common::{AppendedRow, Reservation, ReservationDraft, ReservationStore};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::logic::{find_conflict, BookingError};
use crate::models::SessionStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Ready(Vec<Reservation>),
    Failed(String),
}

impl ViewState {
    pub fn status(&self) -> SessionStatus {
        match self {
            ViewState::Loading => SessionStatus::Loading,
            ViewState::Ready(_) => SessionStatus::Ready,
            ViewState::Failed(_) => SessionStatus::Failed,
        }
    }
}

/// Owns the reservation snapshot every read is answered from.
pub struct BookingSession {
    store: Arc<dyn ReservationStore>,
    state: RwLock<ViewState>,
    // Serializes creates from the conflict check through the local push.
    write_guard: Mutex<()>,
}

impl BookingSession {
    /// Starts in [`ViewState::Loading`]; call [`BookingSession::reload`] to fill it.
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self {
            store,
            state: RwLock::new(ViewState::Loading),
            write_guard: Mutex::new(()),
        }
    }

    /// Fetches the full list again.
    ///
    /// A ready session stays readable while the fetch runs; a failed one goes
    /// back through `Loading`. When reloads race, the last one to finish wins.
    pub async fn reload(&self) -> Result<usize, BookingError> {
        {
            let mut state = self.state.write().await;
            if !matches!(*state, ViewState::Ready(_)) {
                *state = ViewState::Loading;
            }
        }

        match self.store.fetch_all().await {
            Ok(reservations) => {
                let count = reservations.len();
                *self.state.write().await = ViewState::Ready(reservations);
                info!("reservation list ready ({} entries)", count);
                Ok(count)
            }
            Err(e) => {
                let err = BookingError::from(e);
                *self.state.write().await = ViewState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn status(&self) -> SessionStatus {
        self.state.read().await.status()
    }

    /// Runs `f` against the ready list.
    pub async fn read<R>(&self, f: impl FnOnce(&[Reservation]) -> R) -> Result<R, BookingError> {
        match &*self.state.read().await {
            ViewState::Ready(reservations) => Ok(f(reservations)),
            ViewState::Loading => Err(BookingError::Loading),
            ViewState::Failed(msg) => Err(BookingError::FetchFailed(msg.clone())),
        }
    }

    pub async fn snapshot(&self) -> Result<Vec<Reservation>, BookingError> {
        self.read(|r| r.to_vec()).await
    }

    /// Checks the draft against the local list, writes it, then records it.
    ///
    /// Nothing is recorded locally unless the store accepted the write.
    /// Concurrent creates run one at a time, so the second one sees the first.
    pub async fn create(
        &self,
        draft: ReservationDraft,
    ) -> Result<(Reservation, AppendedRow), BookingError> {
        let _guard = self.write_guard.lock().await;
        self.read(|reservations| {
            match find_conflict(&draft.resource_id, draft.start_date, draft.end_date, reservations) {
                Some(existing) => Err(BookingError::Conflict {
                    resource: draft.resource_id.clone(),
                    external_ref: existing.external_ref.clone(),
                    start: existing.start_date,
                    end: existing.end_date,
                }),
                None => Ok(()),
            }
        })
        .await??;

        let appended = self.store.append(draft.clone()).await?;

        let mut state = self.state.write().await;
        let ViewState::Ready(reservations) = &mut *state else {
            warn!(
                "reservation list reset while writing row {}, reload to see it",
                appended.row_number
            );
            let reservation = Reservation::from_draft(draft, String::new(), appended.external_ref.clone());
            return Ok((reservation, appended));
        };
        let reservation = Reservation::from_draft(
            draft,
            reservations.len().to_string(),
            appended.external_ref.clone(),
        );
        reservations.push(reservation.clone());
        Ok((reservation, appended))
    }
}
