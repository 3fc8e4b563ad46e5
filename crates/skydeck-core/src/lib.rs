pub mod config;
pub mod error;

pub use config::{
    Config, LocationConfig, UiConfig, UnitSystem, ValidationResult, WeatherConfig, API_KEY_ENV,
};
pub use error::{
    AppError, ConfigError, NetworkError, ReqwestErrorExt, RusqliteErrorExt, StorageError,
    WeatherError,
};

use anyhow::Result;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Initialize tracing/logging.
///
/// Logs go to stderr so they never interleave with the dashboard on stdout.
pub fn init(debug: bool) -> Result<()> {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(debug)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("Skydeck core initialized");
    Ok(())
}
