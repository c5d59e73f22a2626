use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}, time::Duration};

use crate::{provider::openweather::DEFAULT_BASE_URL, time_basis::TimeBasis};

pub const ENV_API_KEY: &str = "EXTERNAL_API_KEY";
pub const ENV_BASE_URL: &str = "OPENWEATHER_BASE_URL";
pub const ENV_TIMEZONE: &str = "WEATHER_TIMEZONE";
pub const ENV_UPSTREAM_TIMEOUT: &str = "UPSTREAM_TIMEOUT_SECS";

/// Optional on-disk and environment configuration, before validation.
///
/// Example TOML:
/// api_key = "..."
/// timezone = "Europe/London"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// `utc`, `local` or an IANA zone name.
    pub timezone: Option<String>,
    pub upstream_timeout_secs: Option<u64>,
}

/// Validated settings the service is built from. Immutable once resolved.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub time_basis: TimeBasis,
    pub upstream_timeout: Option<Duration>,
}

impl Config {
    /// Load config from the platform config dir, or an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit path; the file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay process environment variables on top of the file values.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay variables read through `lookup`; blank values are ignored.
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = var(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = var(ENV_BASE_URL) {
            self.base_url = Some(url);
        }
        if let Some(tz) = var(ENV_TIMEZONE) {
            self.timezone = Some(tz);
        }
        if let Some(secs) = var(ENV_UPSTREAM_TIMEOUT) {
            let secs = secs
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_UPSTREAM_TIMEOUT} must be a whole number of seconds"))?;
            self.upstream_timeout_secs = Some(secs);
        }

        Ok(self)
    }

    /// Validate into [`Settings`]. Fails when no API key is available.
    pub fn resolve(self) -> Result<Settings> {
        let api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| anyhow!("No external API key provided (set {ENV_API_KEY})"))?;

        let time_basis = match self.timezone.as_deref() {
            Some(tz) => tz.parse::<TimeBasis>()?,
            None => TimeBasis::default(),
        };

        let upstream_timeout = match self.upstream_timeout_secs {
            Some(0) => bail!("upstream_timeout_secs must be greater than zero"),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(Settings {
            api_key,
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            time_basis,
            upstream_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn resolve_errors_without_api_key() {
        let err = Config::default().resolve().unwrap_err();
        assert!(err.to_string().contains("No external API key provided"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = Config::default()
            .with_env_from(env(&[(ENV_API_KEY, "   ")]))
            .unwrap();
        assert!(cfg.resolve().is_err());

        let cfg = Config {
            api_key: Some(String::new()),
            ..Config::default()
        };
        assert!(cfg.resolve().is_err());
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let settings = Config::default()
            .with_env_from(env(&[(ENV_API_KEY, "KEY")]))
            .unwrap()
            .resolve()
            .unwrap();

        assert_eq!(settings.api_key, "KEY");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.time_basis, TimeBasis::default());
        assert_eq!(settings.upstream_timeout, None);
    }

    #[test]
    fn env_overrides_file_values() {
        let file: Config = toml::from_str(
            r#"
            api_key = "FILE_KEY"
            timezone = "utc"
            upstream_timeout_secs = 5
            "#,
        )
        .unwrap();

        let settings = file
            .with_env_from(env(&[
                (ENV_API_KEY, "ENV_KEY"),
                (ENV_BASE_URL, "http://localhost:9999/forecast"),
                (ENV_UPSTREAM_TIMEOUT, "2"),
            ]))
            .unwrap()
            .resolve()
            .unwrap();

        assert_eq!(settings.api_key, "ENV_KEY");
        assert_eq!(settings.base_url, "http://localhost:9999/forecast");
        assert_eq!(settings.time_basis, TimeBasis::Utc);
        assert_eq!(settings.upstream_timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = Config::default()
            .with_env_from(env(&[(ENV_UPSTREAM_TIMEOUT, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_UPSTREAM_TIMEOUT));

        let cfg = Config {
            api_key: Some("KEY".into()),
            timezone: Some("Nowhere/Special".into()),
            ..Config::default()
        };
        assert!(cfg.resolve().unwrap_err().to_string().contains("Unknown timezone"));

        let cfg = Config {
            api_key: Some("KEY".into()),
            upstream_timeout_secs: Some(0),
            ..Config::default()
        };
        assert!(cfg.resolve().is_err());
    }
}
