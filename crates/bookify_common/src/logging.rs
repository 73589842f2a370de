//! Logging utilities for the Bookify application.
//!
//! Provides a standardized `tracing` setup used by the backend binary.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
///
/// This should be called once at the start of the application. The filter
/// honors `RUST_LOG` directives from the environment.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific minimum log level.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("bookify={level}").parse().unwrap());

    // try_init so tests that initialize logging repeatedly don't panic
    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
