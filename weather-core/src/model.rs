use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};
use serde_json::Number;
use std::fmt;
use thiserror::Error;

/// A single field of [`ForecastDetails`] that a caller may ask for on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detail {
    Temperature,
    Pressure,
    Humidity,
}

impl Detail {
    pub fn as_str(&self) -> &'static str {
        match self {
            Detail::Temperature => "temperature",
            Detail::Pressure => "pressure",
            Detail::Humidity => "humidity",
        }
    }

    pub const fn all() -> &'static [Detail] {
        &[Detail::Temperature, Detail::Pressure, Detail::Humidity]
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown detail '{0}'. Supported details: temperature, pressure, humidity.")]
pub struct UnknownDetail(pub String);

impl TryFrom<&str> for Detail {
    type Error = UnknownDetail;

    // Path segments are matched exactly; "Temperature" is not a detail.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Detail::all()
            .iter()
            .copied()
            .find(|d| d.as_str() == value)
            .ok_or_else(|| UnknownDetail(value.to_string()))
    }
}

/// Path parameters of a forecast query.
#[derive(Debug, Clone)]
pub struct QueryParams {
    pub date: String,
    pub time: String,
    pub detail: Option<Detail>,
}

/// One element of the upstream `list` array.
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastEntry {
    pub dt: i64,
    /// Description of the first object in the upstream `weather` list.
    #[serde(rename = "weather", deserialize_with = "first_description")]
    pub description: String,
    pub main: RawMain,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMain {
    /// Kelvin.
    pub temp: f64,
    pub pressure: Number,
    pub humidity: Number,
}

#[derive(Debug, Deserialize)]
struct RawWeather {
    description: String,
}

fn first_description<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let weather = Vec::<RawWeather>::deserialize(deserializer)?;
    weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| serde::de::Error::invalid_length(0, &"at least one weather object"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastDetails {
    pub description: String,
    pub temperature: String,
    pub pressure: String,
    pub humidity: String,
}

impl ForecastDetails {
    pub fn get(&self, detail: Detail) -> &str {
        match detail {
            Detail::Temperature => &self.temperature,
            Detail::Pressure => &self.pressure,
            Detail::Humidity => &self.humidity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedForecast {
    pub dt: i64,
    pub details: ForecastDetails,
}

/// A single detail narrowed out of [`ForecastDetails`], serialized as `{detail: value}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub detail: Detail,
    pub value: String,
}

impl Serialize for Projection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.detail.as_str(), &self.value)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub status: &'static str,
    pub message: String,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

/// Body of every forecast response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Details(ForecastDetails),
    Projection(Projection),
    Error(ErrorPayload),
}
