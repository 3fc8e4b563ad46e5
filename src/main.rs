use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use skydeck_core::{Config, UnitSystem};
use skydeck_dashboard::{Dashboard, Services, TerminalRenderer};
use skydeck_store::{KeyValueStore, MemoryKvStore, Preferences, SqliteKvStore};
use skydeck_weather::{IpLocator, WeatherProvider};

/// Terminal weather dashboard backed by OpenWeatherMap.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (default: <config dir>/skydeck/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Unit system at startup, overrides the config
    #[arg(short, long)]
    units: Option<UnitSystem>,

    /// Keep preferences in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Verbose logging
    #[arg(short, long)]
    debug: bool,

    /// City to look up at startup
    city: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    skydeck_core::init(cli.debug)?;

    let (mut config, _) = Config::load_validated(cli.config.as_deref())?;
    if let Some(units) = cli.units {
        config.weather.units = units;
    }

    let store: Arc<dyn KeyValueStore> = if cli.ephemeral {
        Arc::new(MemoryKvStore::new())
    } else {
        let path = config.database_path();
        tracing::debug!("Opening preference store at {}", path.display());
        Arc::new(
            SqliteKvStore::open(&path)
                .with_context(|| format!("Failed to open {}", path.display()))?,
        )
    };

    let timeout = Duration::from_secs(config.weather.request_timeout_secs);
    let provider =
        WeatherProvider::from_config(&config.weather).context("Failed to build weather client")?;
    let locator = IpLocator::from_config(&config.location, timeout)
        .context("Failed to build location client")?;
    if !locator.is_available() {
        tracing::info!("Device location lookup is disabled in the config");
    }
    let services = Services::new(provider, locator, Preferences::new(store));

    let mut dashboard = Dashboard::new(
        &config,
        services,
        TerminalRenderer::default(),
        std::io::stdout(),
    );

    tracing::info!("Skydeck started");
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    dashboard.run(stdin, cli.city).await?;

    tracing::info!("Skydeck stopped");
    Ok(())
}
