// File: crates/fleetbook_sheets/src/auth.rs
//! Bearer credentials for the spreadsheet write path.
//!
//! A [`SheetsSession`] is created by whoever owns the store and is passed in
//! explicitly. It acquires a token the first time a write needs one and
//! reuses it until the API answers 401.

use fleetbook_common::BoxFuture;
use fleetbook_config::SheetsConfig;
use std::{path::Path, sync::Arc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

use crate::client::SheetsError;

/// OAuth scope granting read/write access to spreadsheets.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Source of bearer tokens. Implementations may be interactive or not.
pub trait TokenProvider: Send + Sync {
    fn fetch_token(&self) -> BoxFuture<'_, String, SheetsError>;
}

/// Obtains tokens from a Google service account key file.
pub struct ServiceAccountTokenProvider {
    key_path: String,
}

impl ServiceAccountTokenProvider {
    pub fn new(key_path: impl Into<String>) -> Self {
        Self {
            key_path: key_path.into(),
        }
    }
}

impl TokenProvider for ServiceAccountTokenProvider {
    fn fetch_token(&self) -> BoxFuture<'_, String, SheetsError> {
        Box::pin(async move {
            let sa_key = read_service_account_key(Path::new(&self.key_path))
                .await
                .map_err(|e| SheetsError::Auth(format!("reading {}: {}", self.key_path, e)))?;

            let auth = ServiceAccountAuthenticator::builder(sa_key)
                .build()
                .await
                .map_err(|e| SheetsError::Auth(e.to_string()))?;

            let access_token = auth
                .token(&[SHEETS_SCOPE])
                .await
                .map_err(|e| SheetsError::Auth(e.to_string()))?;

            match access_token.token() {
                Some(token) => Ok(token.to_string()),
                None => Err(SheetsError::Auth("No token available".to_string())),
            }
        })
    }
}

/// A fixed token, for tests and for deployments that mint tokens elsewhere.
pub struct StaticTokenProvider(pub String);

impl TokenProvider for StaticTokenProvider {
    fn fetch_token(&self) -> BoxFuture<'_, String, SheetsError> {
        let token = self.0.clone();
        Box::pin(async move { Ok(token) })
    }
}

/// Stand-in when no service account key is configured; every write is refused.
pub struct MissingCredentials;

impl TokenProvider for MissingCredentials {
    fn fetch_token(&self) -> BoxFuture<'_, String, SheetsError> {
        Box::pin(async {
            Err(SheetsError::Auth(
                "no service account key configured (sheets.key_path)".to_string(),
            ))
        })
    }
}

/// Picks the token source from `sheets.key_path`.
pub fn provider_from_config(config: &SheetsConfig) -> Arc<dyn TokenProvider> {
    match config.key_path.as_deref().filter(|p| !p.is_empty()) {
        Some(path) => Arc::new(ServiceAccountTokenProvider::new(path)),
        None => {
            warn!("sheets.key_path is not set, bookings cannot be written");
            Arc::new(MissingCredentials)
        }
    }
}

/// Caches the bearer token for the lifetime of the caller.
pub struct SheetsSession {
    provider: Arc<dyn TokenProvider>,
    token: Mutex<Option<String>>,
}

impl SheetsSession {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            provider,
            token: Mutex::new(None),
        }
    }

    /// Returns the cached token, acquiring one first if there is none.
    pub async fn bearer(&self) -> Result<String, SheetsError> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            return Ok(token.clone());
        }
        info!("acquiring spreadsheet write credential");
        let token = self.provider.fetch_token().await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    /// Drops the cached token so the next [`bearer`](Self::bearer) re-acquires.
    pub async fn invalidate(&self) {
        debug!("discarding cached spreadsheet credential");
        self.token.lock().await.take();
    }
}
