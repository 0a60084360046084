// --- File: crates/fleetbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Google Sheets Config ---
// Holds non-secret sheet coordinates. The API key and the service account
// key path are usually set to "secret_from_env" and injected at load time.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String, // Mandatory
    /// Sheet tab name, e.g. "公務車預約使用表".
    pub sheet_name: String,
    /// First spreadsheet row holding reservation data (1-based).
    #[serde(default = "default_first_data_row")]
    pub first_data_row: u32,
    pub api_key: Option<String>,  // Loaded via SHEETS_API_KEY
    pub key_path: Option<String>, // Loaded via SHEETS_KEY_PATH
    /// Override for tests and proxies. Defaults to the public Sheets endpoint.
    pub base_url: Option<String>,
}

fn default_first_data_row() -> u32 {
    5
}

impl SheetsConfig {
    /// The A1 range covering every reservation column, open-ended downwards.
    pub fn read_range(&self) -> String {
        format!("{}!A{}:H", self.sheet_name, self.first_data_row)
    }

    /// The A1 range of exactly one reservation row.
    pub fn row_range(&self, row_number: u32) -> String {
        format!("{}!A{row_number}:H{row_number}", self.sheet_name)
    }
}

/// How multi-day reservations are keyed when grouped by date.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroupingPolicy {
    /// A reservation is listed under every day it occupies.
    #[default]
    ExpandDays,
    /// A reservation is listed under its start date only.
    StartDate,
}

/// Which date "hide expired" compares against.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryReference {
    Today,
    #[default]
    SelectedDate,
}

// --- Booking Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    #[serde(default)]
    pub grouping_policy: GroupingPolicy,
    #[serde(default)]
    pub expiry_reference: ExpiryReference,
    #[serde(default = "default_hide_expired")]
    pub hide_expired: bool,
    /// IANA zone used to decide what "today" is.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// Longest accepted reservation, in days, counting both ends.
    #[serde(default = "default_max_days")]
    pub max_days: u32,
    pub password: Option<String>, // Loaded via BOOKING_PASSWORD
}

fn default_hide_expired() -> bool {
    true
}

fn default_time_zone() -> String {
    "Asia/Taipei".to_string()
}

pub const DEFAULT_MAX_DAYS: u32 = 90;

fn default_max_days() -> u32 {
    DEFAULT_MAX_DAYS
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            grouping_policy: GroupingPolicy::default(),
            expiry_reference: ExpiryReference::default(),
            hide_expired: default_hide_expired(),
            time_zone: default_time_zone(),
            max_days: default_max_days(),
            password: None,
        }
    }
}

// --- Fleet reference data ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct VehicleConfig {
    /// Plate number, e.g. "BJK-0596".
    pub id: String,
    pub label: String,
    pub location: String,
    pub region: String,
    pub color: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RegionConfig {
    pub name: String,
    pub color: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FleetConfig {
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub regions: Vec<RegionConfig>,
    #[serde(default)]
    pub vehicles: Vec<VehicleConfig>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,
    pub sheets: SheetsConfig,

    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub fleet: FleetConfig,
}
