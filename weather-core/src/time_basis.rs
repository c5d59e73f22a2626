use anyhow::anyhow;
use chrono::{Local, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use std::{fmt, str::FromStr};

/// How a requested wall-clock time is turned into Unix epoch seconds.
///
/// Upstream `dt` values are always UTC epochs, so the basis decides which
/// zone's civil time the caller is assumed to be speaking in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBasis {
    Utc,
    /// Whatever zone the host is configured with.
    Local,
    Zone(Tz),
}

impl Default for TimeBasis {
    fn default() -> Self {
        TimeBasis::Zone(chrono_tz::Europe::London)
    }
}

impl TimeBasis {
    /// Returns `None` when the wall-clock time does not exist in the zone
    /// (skipped by a DST transition). Repeated times resolve to the earliest
    /// instant.
    pub fn to_epoch(&self, naive: NaiveDateTime) -> Option<i64> {
        match self {
            TimeBasis::Utc => Some(naive.and_utc().timestamp()),
            TimeBasis::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.timestamp()),
            TimeBasis::Zone(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.timestamp()),
        }
    }
}

impl fmt::Display for TimeBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBasis::Utc => f.write_str("utc"),
            TimeBasis::Local => f.write_str("local"),
            TimeBasis::Zone(tz) => f.write_str(tz.name()),
        }
    }
}

impl FromStr for TimeBasis {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_lowercase().as_str() {
            "utc" => Ok(TimeBasis::Utc),
            "local" => Ok(TimeBasis::Local),
            _ => trimmed.parse::<Tz>().map(TimeBasis::Zone).map_err(|_| {
                anyhow!(
                    "Unknown timezone '{value}'. Use 'utc', 'local' or an IANA name such as 'Europe/London'."
                )
            }),
        }
    }
}
