//! Error types for the forecast pipeline.

use chrono::NaiveDateTime;
use reqwest::StatusCode;
use thiserror::Error;

/// Failure to obtain a usable forecast list from OpenWeatherMap.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("OpenWeather request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("Failed to connect to OpenWeather: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("OpenWeather request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("OpenWeather forecast request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse OpenWeather forecast JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    /// Short tag used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Connect(_) => "connect",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else if err.is_connect() {
            Self::Connect(err)
        } else {
            Self::Transport(err)
        }
    }
}

/// Everything that can turn a forecast query into an error body.
///
/// The `Display` output is the exact message returned to callers.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Unable to get data from openweathermap")]
    Upstream(#[from] UpstreamError),

    #[error("Invalid date/time")]
    InvalidDateTime,

    #[error("No data for {}", .0.format("%Y-%m-%d %H:%M"))]
    NoData(NaiveDateTime),
}
