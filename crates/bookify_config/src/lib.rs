use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources, in order of increasing precedence:
/// 1. `config/default` file (any format the `config` crate understands), if present
/// 2. `config/{RUN_ENV}` file, if present
/// 3. Environment variables with the `BOOKIFY` prefix and `__` separator,
///    e.g. `BOOKIFY__SERVER__PORT=3000`, `BOOKIFY__GCAL__CALENDAR_ID=primary`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "BOOKIFY".to_string());

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_env}")).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment exactly once.
///
/// The path can be overridden with `DOTENV_OVERRIDE`; otherwise `.env` in the
/// working directory is used. Missing files are silently ignored.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
