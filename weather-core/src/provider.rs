use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    config::Settings, error::UpstreamError, model::RawForecastEntry,
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// Source of the raw forecast list for the fixed location.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self) -> Result<Vec<RawForecastEntry>, UpstreamError>;
}

/// Construct the OpenWeather provider from resolved settings.
pub fn provider_from_settings(settings: &Settings) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let provider = OpenWeatherProvider::new(
        &settings.base_url,
        &settings.api_key,
        settings.upstream_timeout,
    )?;
    Ok(Box::new(provider))
}
