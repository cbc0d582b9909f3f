use std::collections::HashMap;
use std::time::Duration;

use chrono_tz::Tz;

use crate::error::ConfigError;

pub const DEFAULT_ICAO: &str = "KLAF";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Indiana::Indianapolis;
pub const DEFAULT_API_URL: &str = "https://api.weather.gov";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the fetcher and the poller need to know about the station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationConfig {
    pub icao: String,

    /// Zone the observation timestamps are reported in.
    pub timezone: Tz,

    pub poll_interval: Duration,

    pub request_timeout: Duration,

    pub api_url: String,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            icao: DEFAULT_ICAO.to_string(),
            timezone: DEFAULT_TIMEZONE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl StationConfig {
    /// Builds a config from one section of the host configuration.
    ///
    /// Recognised keys are `icao`, `timezone`, `poll_interval` and `timeout`
    /// (both in seconds) and `api_url`. Unknown keys such as `driver` are ignored.
    pub fn from_map(section: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(icao) = section.get("icao") {
            config.icao = parse_icao(icao)?;
        }

        if let Some(timezone) = section.get("timezone") {
            config.timezone = timezone
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "timezone",
                    value: timezone.clone(),
                })?;
        }

        if let Some(secs) = section.get("poll_interval") {
            config.poll_interval = parse_seconds("poll_interval", secs)?;
        }

        if let Some(secs) = section.get("timeout") {
            config.request_timeout = parse_seconds("timeout", secs)?;
        }

        if let Some(url) = section.get("api_url") {
            config.api_url = url.trim().to_string();
        }

        Ok(config)
    }

    pub fn latest_observation_url(&self) -> String {
        format!(
            "{}/stations/{}/observations/latest",
            self.api_url.trim_end_matches('/'),
            self.icao
        )
    }
}

/// Normalises a station identifier to upper case.
pub fn parse_icao(raw: &str) -> Result<String, ConfigError> {
    let icao = raw.trim();

    if icao.is_empty() || !icao.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::InvalidIcao(raw.to_string()));
    }

    Ok(icao.to_ascii_uppercase())
}

fn parse_seconds(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_section_uses_defaults() {
        let config = StationConfig::from_map(&HashMap::new()).unwrap();
        assert_eq!(config, StationConfig::default());
        assert_eq!(
            config.latest_observation_url(),
            "https://api.weather.gov/stations/KLAF/observations/latest"
        );
    }

    #[test]
    fn all_keys_are_read() {
        let config = StationConfig::from_map(&section(&[
            ("icao", " kbos "),
            ("driver", "user.nws"),
            ("timezone", "America/New_York"),
            ("poll_interval", "120"),
            ("timeout", "5"),
            ("api_url", "http://127.0.0.1:8080/"),
        ]))
        .unwrap();

        assert_eq!(config.icao, "KBOS");
        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert_eq!(config.poll_interval, Duration::from_secs(120));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(
            config.latest_observation_url(),
            "http://127.0.0.1:8080/stations/KBOS/observations/latest"
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            StationConfig::from_map(&section(&[("icao", "K/LAF")])),
            Err(ConfigError::InvalidIcao(_))
        ));
        assert!(matches!(
            StationConfig::from_map(&section(&[("icao", "")])),
            Err(ConfigError::InvalidIcao(_))
        ));
        assert!(matches!(
            StationConfig::from_map(&section(&[("timezone", "Mars/Olympus")])),
            Err(ConfigError::InvalidValue { key: "timezone", .. })
        ));
        assert!(matches!(
            StationConfig::from_map(&section(&[("poll_interval", "0")])),
            Err(ConfigError::InvalidValue {
                key: "poll_interval",
                ..
            })
        ));
        assert!(matches!(
            StationConfig::from_map(&section(&[("timeout", "soon")])),
            Err(ConfigError::InvalidValue { key: "timeout", .. })
        ));
    }
}
