// --- File: crates/bookify_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error taxonomy and HTTP mapping
pub mod features; // Runtime collaborator-flag handling
pub mod logging; // Logging utilities
pub mod models; // Shared data models
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    conflict, config_error, external_service_error, internal_error, validation_error,
    BookifyError, HttpStatusCode,
};

// Re-export feature flag handling utilities for easier access
pub use features::{is_db_enabled, is_feature_enabled, is_gcal_enabled, is_twilio_enabled};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};
