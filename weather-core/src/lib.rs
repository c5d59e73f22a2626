//! Core library for the London forecast proxy.
//!
//! This crate defines:
//! - Configuration loading & validation
//! - The upstream forecast provider abstraction (OpenWeatherMap)
//! - Forecast normalization, lookup and projection
//! - The query pipeline tying those together
//!
//! It is used by `weather-server`, but does not depend on any HTTP server framework.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod service;
pub mod time_basis;
pub mod transform;

pub use config::{Config, Settings};
pub use error::{QueryError, UpstreamError};
pub use model::{Detail, ErrorPayload, QueryParams, ResponsePayload};
pub use provider::{ForecastProvider, provider_from_settings};
pub use service::ForecastService;
pub use time_basis::TimeBasis;
