// --- File: crates/fleetbook_sheets/src/lib.rs ---
pub mod auth;
pub mod client;
pub mod rows;
pub mod service;

pub use auth::{
    provider_from_config, MissingCredentials, ServiceAccountTokenProvider, SheetsSession,
    StaticTokenProvider, TokenProvider,
};
pub use client::{SheetsClient, SheetsError};
pub use service::SheetsReservationStore;
