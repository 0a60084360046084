// --- File: crates/services/fleetbook_backend/src/service_factory.rs ---
//! Wires the spreadsheet store, the credential session and the booking
//! session together from the loaded configuration.

use fleetbook_booking::{BookingSession, BookingState, Fleet, FleetError};
use fleetbook_common::{ReservationStore, HTTP_CLIENT};
use fleetbook_config::AppConfig;
use fleetbook_sheets::{provider_from_config, SheetsClient, SheetsReservationStore, SheetsSession};
use std::sync::Arc;
use tracing::info;

/// Builds the Sheets-backed reservation store.
pub fn sheets_store(config: &AppConfig) -> Arc<dyn ReservationStore> {
    let client = SheetsClient::new((*HTTP_CLIENT).clone(), &config.sheets);
    let session = Arc::new(SheetsSession::new(provider_from_config(&config.sheets)));
    Arc::new(
        SheetsReservationStore::new(client, session, config.sheets.clone())
            .with_max_days(config.booking.max_days),
    )
}

/// Validates the fleet table and assembles the handler state.
///
/// The session starts out `Loading`; the caller triggers the first load.
pub fn booking_state(
    config: Arc<AppConfig>,
    store: Arc<dyn ReservationStore>,
) -> Result<Arc<BookingState>, FleetError> {
    let fleet = Fleet::from_config(&config.fleet)?;
    info!(
        "fleet loaded: {} vehicles ({} active), {} regions",
        fleet.vehicles().len(),
        fleet.active_ids().len(),
        fleet.regions().len()
    );
    Ok(Arc::new(BookingState {
        config,
        fleet: Arc::new(fleet),
        session: Arc::new(BookingSession::new(store)),
    }))
}
