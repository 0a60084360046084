//! Thin client for the Google Sheets v4 `values` endpoints.

use fleetbook_config::SheetsConfig;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// Errors that can occur when talking to the Sheets API.
#[derive(Error, Debug)]
pub enum SheetsError {
    /// Transport failure (DNS, TLS, timeout, ...)
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("Sheets API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The API rejected the bearer credential
    #[error("Sheets API rejected the credential: {0}")]
    AuthRequired(String),

    /// No credential could be obtained
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Missing configuration: {0}")]
    ConfigError(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeUpdate<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: Vec<Vec<String>>,
}

/// Cells come back as strings with FORMATTED_VALUE, but numbers and booleans
/// are tolerated too.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Client bound to one spreadsheet.
#[derive(Clone)]
pub struct SheetsClient {
    http: Client,
    base_url: String,
    spreadsheet_id: String,
    api_key: Option<String>,
}

impl SheetsClient {
    pub fn new(http: Client, config: &SheetsConfig) -> Self {
        Self {
            http,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, self.spreadsheet_id, range
        )
    }

    /// Reads a range as a grid of display strings. Trailing blank cells and
    /// rows are absent, exactly as the API omits them.
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SheetsError::ConfigError("sheets.api_key".to_string()))?;

        debug!("reading sheet range {}", range);
        let response = self
            .http
            .get(self.values_url(range))
            .query(&[
                ("key", api_key),
                ("valueRenderOption", "FORMATTED_VALUE"),
                ("dateTimeRenderOption", "FORMATTED_STRING"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::ApiError { status, body });
        }

        let value_range: ValueRange = response.json().await?;
        Ok(value_range
            .values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    /// Overwrites one row range with `cells`, authenticated by `bearer`.
    pub async fn update_row(
        &self,
        range: &str,
        cells: Vec<String>,
        bearer: &str,
    ) -> Result<(), SheetsError> {
        debug!("writing sheet range {}", range);
        let body = ValueRangeUpdate {
            range,
            major_dimension: "ROWS",
            values: vec![cells],
        };
        let response = self
            .http
            .put(self.values_url(range))
            .query(&[("valueInputOption", "USER_ENTERED")])
            .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
            .json(&body)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => {
                let body = response.text().await.unwrap_or_default();
                Err(SheetsError::AuthRequired(body))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(SheetsError::ApiError {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
