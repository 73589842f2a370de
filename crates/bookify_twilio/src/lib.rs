// --- File: crates/bookify_twilio/src/lib.rs ---
pub mod phone;
pub mod service;

pub use phone::normalize_phone;
pub use service::{TwilioError, TwilioNotificationService};
