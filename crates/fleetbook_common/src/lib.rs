// --- File: crates/fleetbook_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared reservation records
pub mod services; // Service abstractions

pub use error::{
    config_error, conflict, external_service_error, not_found, validation_error, FleetbookError,
    HttpStatusCode,
};

pub use http::{
    client::{create_client, HTTP_CLIENT},
    handle_json_result, IntoHttpResponse,
};

pub use logging::{init, init_with_level, log_error, log_result};

pub use models::{span_days, Reservation, ReservationDraft, ResourceId};
pub use services::{AppendedRow, BoxFuture, ReservationStore, StoreError};
