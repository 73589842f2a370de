// --- File: crates/bookify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// --- Database Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g., DATABASE_URL loaded via BOOKIFY__DATABASE__URL
}

// --- Twilio Config ---
// Holds the messaging sender identity. Secrets come in via env overrides.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TwilioConfig {
    pub account_sid: String, // Loaded via BOOKIFY__TWILIO__ACCOUNT_SID
    pub auth_token: String,  // Loaded via BOOKIFY__TWILIO__AUTH_TOKEN
    pub from_number: String, // The configured sender identity, e.g. "+15005550006"
}

// --- Google Calendar Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    /// Path to the service account key JSON file.
    pub key_path: Option<String>,
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    /// IANA timezone the booking date+time pair is interpreted in.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_time_zone() -> String {
    "Europe/Lisbon".to_string()
}

impl Default for GcalConfig {
    fn default() -> Self {
        Self {
            key_path: None,
            calendar_id: default_calendar_id(),
            time_zone: default_time_zone(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default)]
    pub use_db: bool,
    #[serde(default)]
    pub use_twilio: bool,

    // --- Optional Collaborator Configurations ---
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub twilio: Option<TwilioConfig>,
}
