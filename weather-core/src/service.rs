//! The forecast query pipeline: fetch, parse, normalize, locate.

use crate::{
    error::QueryError,
    lookup::{locate, parse_target},
    model::{ErrorPayload, QueryParams, ResponsePayload},
    provider::ForecastProvider,
    time_basis::TimeBasis,
    transform::normalize,
};

#[derive(Debug)]
pub struct ForecastService {
    provider: Box<dyn ForecastProvider>,
    time_basis: TimeBasis,
}

impl ForecastService {
    pub fn new(provider: Box<dyn ForecastProvider>, time_basis: TimeBasis) -> Self {
        Self {
            provider,
            time_basis,
        }
    }

    /// Answer a query. Failures are folded into an error payload.
    pub async fn query(&self, params: &QueryParams) -> ResponsePayload {
        match self.try_query(params).await {
            Ok(payload) => payload,
            Err(err) => {
                match &err {
                    QueryError::Upstream(upstream) => tracing::warn!(
                        kind = upstream.kind(),
                        error = %upstream,
                        "failed to fetch forecast from upstream"
                    ),
                    other => tracing::debug!(
                        date = %params.date,
                        time = %params.time,
                        error = %other,
                        "forecast query answered with error"
                    ),
                }
                ResponsePayload::Error(ErrorPayload::new(err.to_string()))
            }
        }
    }

    // Upstream is fetched before the date is parsed, so an upstream failure
    // takes precedence over a malformed date/time.
    async fn try_query(&self, params: &QueryParams) -> Result<ResponsePayload, QueryError> {
        let raw = self.provider.fetch_forecast().await?;
        let target = parse_target(&params.date, &params.time, self.time_basis)?;
        let forecasts = normalize(&raw);
        locate(&forecasts, &target, params.detail)
    }
}
