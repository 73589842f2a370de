// --- File: crates/bookify_gcal/src/auth.rs ---
//! Service-account authentication for the calendar client.
//!
//! The hub is built once at startup from the key file named in the
//! configuration and shared behind an `Arc` for the life of the process.

use bookify_config::GcalConfig;
use google_calendar3::{
    hyper_rustls::{HttpsConnector, HttpsConnectorBuilder},
    hyper_util::client::legacy::{connect::HttpConnector, Client},
    yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator},
    CalendarHub,
};
use std::path::Path;
use thiserror::Error;

/// The authenticated calendar client shared across requests.
pub type HubType = CalendarHub<HttpsConnector<HttpConnector>>;

/// Errors raised while building the calendar client.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("missing key_path in calendar configuration")]
    MissingKeyPath,
    #[error("service account setup failed: {0}")]
    Setup(#[from] std::io::Error),
}

/// Builds an authenticated Google Calendar client from the service account
/// key referenced by the configuration.
pub async fn create_calendar_hub(config: &GcalConfig) -> Result<HubType, AuthError> {
    let key_path = config.key_path.as_deref().ok_or(AuthError::MissingKeyPath)?;
    let key = read_service_account_key(Path::new(key_path)).await?;
    let auth = ServiceAccountAuthenticator::builder(key).build().await?;

    let connector = HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();
    let http = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector);

    Ok(CalendarHub::new(http, auth))
}
