// --- File: crates/bookify_twilio/src/service.rs ---
//! Twilio notification service implementation.

use bookify_common::services::{BoxFuture, NotificationResult, NotificationService};
use bookify_config::AppConfig;
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Twilio-specific error types.
#[derive(Error, Debug)]
pub enum TwilioError {
    /// Error occurred during a Twilio API request
    #[error("Twilio API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Twilio API
    #[error("Twilio API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Missing or incomplete Twilio configuration
    #[error("Twilio configuration missing or incomplete")]
    ConfigError,
}

/// Twilio notification service implementation.
///
/// Sends text messages through the Twilio REST API from the sender identity
/// in the configuration.
pub struct TwilioNotificationService {
    config: Arc<AppConfig>,
    http: Client,
}

impl TwilioNotificationService {
    /// Create a new Twilio notification service.
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

impl NotificationService for TwilioNotificationService {
    type Error = TwilioError;

    fn send_sms(&self, to: &str, body: &str) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let body = body.to_string();

        Box::pin(async move {
            let twilio_config = self.config.twilio.as_ref().ok_or(TwilioError::ConfigError)?;

            let url = format!(
                "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
                twilio_config.account_sid
            );

            let params = [
                ("To", to.as_str()),
                ("From", twilio_config.from_number.as_str()),
                ("Body", body.as_str()),
            ];
            info!("Sending SMS to {}", &to);
            let resp = self
                .http
                .post(&url)
                .basic_auth(&twilio_config.account_sid, Some(&twilio_config.auth_token))
                .form(&params)
                .send()
                .await?;

            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();

            if !status.is_success() {
                // Bubble up the Twilio JSON error so you can debug
                tracing::error!("Twilio returned {}: {}", status, text);
                return Err(TwilioError::ApiError {
                    status_code: status.as_u16(),
                    message: text,
                });
            }

            let parsed: serde_json::Value = serde_json::from_str(&text).unwrap_or_default();
            let sid = parsed
                .get("sid")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let message_status = parsed
                .get("status")
                .and_then(|v| v.as_str())
                .unwrap_or("sent")
                .to_string();

            tracing::info!("SMS sent to {}: sid={}", to, sid);
            Ok(NotificationResult {
                id: sid,
                status: message_status,
            })
        })
    }
}
