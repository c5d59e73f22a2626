use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::{error::UpstreamError, model::RawForecastEntry};

use super::ForecastProvider;

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/forecast";
pub const LOCATION_QUERY: &str = "London,uk";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    /// Full request URL, location and key included.
    url: Url,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Option<Duration>) -> Result<Self> {
        let url = Url::parse_with_params(base_url, &[("q", LOCATION_QUERY), ("APPID", api_key)])
            .with_context(|| format!("Invalid OpenWeather base URL: {base_url}"))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { url, http })
    }

    async fn fetch(&self) -> Result<Vec<RawForecastEntry>, UpstreamError> {
        let res = self.http.get(self.url.clone()).send().await?;

        let status = res.status();
        let body = res.text().await?;

        // A non-2xx status only fails the request when the body isn't a forecast.
        match serde_json::from_str::<OwForecastResponse>(&body) {
            Ok(parsed) => {
                if !status.is_success() {
                    tracing::warn!(%status, "OpenWeather returned a forecast with a non-success status");
                }
                Ok(parsed.list)
            }
            Err(_) if !status.is_success() => Err(UpstreamError::Status {
                status,
                body: truncate_body(&body),
            }),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<RawForecastEntry>,
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn fetch_forecast(&self) -> Result<Vec<RawForecastEntry>, UpstreamError> {
        self.fetch().await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
