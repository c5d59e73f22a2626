use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use weather_core::{Config, ForecastService, TimeBasis, provider_from_settings};

use crate::routes;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "London weather forecast API")]
pub struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Config file; defaults to the platform config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// How requested times are interpreted: "utc", "local" or an IANA zone.
    #[arg(long)]
    pub timezone: Option<TimeBasis>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let file = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        let mut settings = match file.with_env().and_then(Config::resolve) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::error!("{err:#}");
                return Err(err);
            }
        };
        if let Some(basis) = self.timezone {
            settings.time_basis = basis;
        }

        let provider = provider_from_settings(&settings)?;
        let service = Arc::new(ForecastService::new(provider, settings.time_basis));
        let app = routes::router(routes::AppState { service });

        let addr = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind weather-server listener on {addr}"))?;

        tracing::info!(
            %addr,
            time_basis = %settings.time_basis,
            "Starting app"
        );
        axum::serve(listener, app).await.context("HTTP server failed")?;

        Ok(())
    }
}
