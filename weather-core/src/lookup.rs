use chrono::NaiveDateTime;

use crate::{
    error::QueryError,
    model::{Detail, NormalizedForecast, Projection, ResponsePayload},
    time_basis::TimeBasis,
};

const DATE_TIME_FORMAT: &str = "%Y%m%d%H%M";

/// The instant a caller asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetTime {
    /// As requested, used when reporting a miss.
    pub local: NaiveDateTime,
    pub epoch: i64,
}

/// Parse `YYYYMMDD` + `HHMM` into a [`TargetTime`].
pub fn parse_target(date: &str, time: &str, basis: TimeBasis) -> Result<TargetTime, QueryError> {
    if !is_digits(date, 8) || !is_digits(time, 4) {
        return Err(QueryError::InvalidDateTime);
    }

    let local = NaiveDateTime::parse_from_str(&format!("{date}{time}"), DATE_TIME_FORMAT)
        .map_err(|_| QueryError::InvalidDateTime)?;
    let epoch = basis.to_epoch(local).ok_or(QueryError::InvalidDateTime)?;

    Ok(TargetTime { local, epoch })
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Find the first entry at `target` and optionally narrow it to one detail.
pub fn locate(
    forecasts: &[NormalizedForecast],
    target: &TargetTime,
    detail: Option<Detail>,
) -> Result<ResponsePayload, QueryError> {
    let forecast = forecasts
        .iter()
        .find(|f| f.dt == target.epoch)
        .ok_or(QueryError::NoData(target.local))?;

    Ok(match detail {
        Some(detail) => ResponsePayload::Projection(Projection {
            detail,
            value: forecast.details.get(detail).to_string(),
        }),
        None => ResponsePayload::Details(forecast.details.clone()),
    })
}
