//! Reshapes upstream forecast entries into the simplified `{dt, details}` form.

use serde_json::Number;

use crate::model::{ForecastDetails, NormalizedForecast, RawForecastEntry};

const KELVIN_OFFSET: f64 = 273.15;

/// Kelvin to whole degrees Celsius, truncated toward zero, suffixed with `C`.
pub fn kelvin_to_celsius(kelvin: f64) -> String {
    let celsius = (kelvin - KELVIN_OFFSET).trunc() as i64;
    format!("{celsius}C")
}

pub fn format_humidity(humidity: &Number) -> String {
    format!("{humidity}%")
}

pub fn normalize(raw: &[RawForecastEntry]) -> Vec<NormalizedForecast> {
    raw.iter()
        .map(|entry| NormalizedForecast {
            dt: entry.dt,
            details: ForecastDetails {
                description: entry.description.clone(),
                temperature: kelvin_to_celsius(entry.main.temp),
                pressure: entry.main.pressure.to_string(),
                humidity: format_humidity(&entry.main.humidity),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawMain;

    fn entry(dt: i64, description: &str, temp: f64) -> RawForecastEntry {
        RawForecastEntry {
            dt,
            description: description.to_string(),
            main: RawMain {
                temp,
                pressure: Number::from(1019),
                humidity: Number::from(55),
            },
        }
    }

    #[test]
    fn celsius_is_truncated_not_rounded() {
        assert_eq!(kelvin_to_celsius(280.0), "6C");
        assert_eq!(kelvin_to_celsius(273.15), "0C");
        assert_eq!(kelvin_to_celsius(274.14), "0C");
    }

    #[test]
    fn celsius_truncates_toward_zero_below_freezing() {
        assert_eq!(kelvin_to_celsius(270.0), "-3C");
        assert_eq!(kelvin_to_celsius(272.9), "0C");
    }

    #[test]
    fn humidity_and_pressure_keep_their_plain_form() {
        assert_eq!(format_humidity(&Number::from(55)), "55%");

        let mut raw = entry(1, "fog", 280.0);
        raw.main.pressure = Number::from_f64(1019.5).unwrap();
        let normalized = normalize(&[raw]);
        assert_eq!(normalized[0].details.pressure, "1019.5");
    }

    #[test]
    fn normalize_preserves_order_and_duplicates() {
        let raw = vec![
            entry(30, "rain", 280.0),
            entry(10, "sunny", 290.0),
            entry(30, "snow", 260.0),
        ];

        let normalized = normalize(&raw);

        let dts: Vec<i64> = normalized.iter().map(|n| n.dt).collect();
        assert_eq!(dts, vec![30, 10, 30]);
        assert_eq!(
            normalized[1].details,
            ForecastDetails {
                description: "sunny".into(),
                temperature: "16C".into(),
                pressure: "1019".into(),
                humidity: "55%".into(),
            }
        );
        assert_eq!(normalized[2].details.temperature, "-13C");
    }

    #[test]
    fn normalize_empty_list() {
        assert!(normalize(&[]).is_empty());
    }
}
