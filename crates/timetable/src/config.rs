//! Timetable service configuration

use keyway_value::coerce::parse_bool;
use serde::{Deserialize, Serialize};
use url::Url;

/// Endpoint the flight timetable is published at
pub const DEFAULT_ENDPOINT: &str = "https://api.myjson.com/bins/w60i";

/// Provider logo edge length, in pixels
pub const DEFAULT_LOGO_SIZE: u32 = 63;

/// Timetable service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeTableConfig {
    /// Where the provider fetches the timetable document from
    pub endpoint: Url,
    /// Size substituted into provider logo URL templates
    pub logo_size: u32,
    /// Accept an empty timetable; when `false` the service requires at least
    /// one row that converts
    pub lenient: bool,
}

impl Default for TimeTableConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            logo_size: DEFAULT_LOGO_SIZE,
            lenient: true,
        }
    }
}

impl TimeTableConfig {
    /// Defaults overridden by `KEYWAY_TIMETABLE_ENDPOINT`, `KEYWAY_LOGO_SIZE`
    /// and `KEYWAY_TIMETABLE_LENIENT`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the environment
    /// keys. Values that do not parse leave the default in place.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("KEYWAY_TIMETABLE_ENDPOINT").and_then(|v| Url::parse(&v).ok()) {
            config.endpoint = endpoint;
        }
        if let Some(size) = lookup("KEYWAY_LOGO_SIZE").and_then(|v| v.trim().parse().ok()) {
            config.logo_size = size;
        }
        if let Some(lenient) = lookup("KEYWAY_TIMETABLE_LENIENT").and_then(|v| parse_bool(v.trim())) {
            config.lenient = lenient;
        }

        config
    }

    /// Set the endpoint
    #[must_use = "builder methods must be chained or built"]
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Set the logo size
    #[must_use = "builder methods must be chained or built"]
    pub fn with_logo_size(mut self, logo_size: u32) -> Self {
        self.logo_size = logo_size;
        self
    }

    /// Require a non-empty timetable
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(mut self) -> Self {
        self.lenient = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TimeTableConfig::default();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.logo_size, 63);
        assert!(config.lenient);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TimeTableConfig =
            serde_json::from_str(r#"{"logo_size": 120, "lenient": false}"#).unwrap();
        assert_eq!(config.logo_size, 120);
        assert!(!config.lenient);
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = TimeTableConfig::from_lookup(lookup(&[
            ("KEYWAY_TIMETABLE_ENDPOINT", "https://timetable.example.com/flights"),
            ("KEYWAY_LOGO_SIZE", " 120 "),
            ("KEYWAY_TIMETABLE_LENIENT", "FALSE"),
        ]));

        assert_eq!(config.endpoint.host_str(), Some("timetable.example.com"));
        assert_eq!(config.logo_size, 120);
        assert!(!config.lenient);
    }

    #[test]
    fn test_from_lookup_keeps_defaults_for_garbage() {
        let config = TimeTableConfig::from_lookup(lookup(&[
            ("KEYWAY_TIMETABLE_ENDPOINT", "flights"),
            ("KEYWAY_LOGO_SIZE", "-3"),
            ("KEYWAY_TIMETABLE_LENIENT", "maybe"),
        ]));
        assert_eq!(config, TimeTableConfig::default());
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        let from_process = TimeTableConfig::from_lookup(|key| std::env::var(key).ok());
        assert_eq!(TimeTableConfig::from_env(), from_process);
    }

    #[test]
    fn test_builders() {
        let config = TimeTableConfig::default().with_logo_size(32).strict();
        assert_eq!(config.logo_size, 32);
        assert!(!config.lenient);
    }
}
