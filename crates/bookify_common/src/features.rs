//! Runtime collaborator-flag handling.
//!
//! Each external collaborator (calendar, datastore, messaging) is live only
//! when its runtime flag is set AND its configuration section is present.
//! These helpers keep that check in one place instead of scattering presence
//! checks through the handlers.

use bookify_config::AppConfig;
use std::sync::Arc;

/// Check if a collaborator is enabled at runtime based on configuration.
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Google Calendar collaborator is enabled at runtime.
pub fn is_gcal_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_gcal, config.gcal.as_ref())
}

/// Check if the datastore collaborator is enabled at runtime.
pub fn is_db_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_db, config.database.as_ref())
}

/// Check if the Twilio messaging collaborator is enabled at runtime.
pub fn is_twilio_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_twilio, config.twilio.as_ref())
}
