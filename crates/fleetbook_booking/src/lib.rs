// --- File: crates/fleetbook_booking/src/lib.rs ---
pub mod auth;
pub mod doc;
pub mod fleet;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod models;
pub mod routes;
pub mod session;
pub mod validation;

pub use fleet::{Fleet, FleetError};
pub use handlers::BookingState;
pub use logic::BookingError;
pub use session::{BookingSession, ViewState};
