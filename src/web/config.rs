use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

use crate::metrics::MetricsOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid tick interval '{0}': {1}")]
    InvalidTick(String, String),
    #[error("invalid metrics threshold: {0}")]
    InvalidThreshold(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Wall time per counted second, e.g. "1s".
    #[serde(default = "default_tick")]
    pub tick: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick: default_tick(),
        }
    }
}

fn default_tick() -> String {
    "1s".to_string()
}

impl SessionConfig {
    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        let tick = humantime::parse_duration(self.tick.trim())
            .map_err(|e| ConfigError::InvalidTick(self.tick.clone(), e.to_string()))?;
        if tick.is_zero() {
            return Err(ConfigError::InvalidTick(
                self.tick.clone(),
                "must be greater than zero".into(),
            ));
        }
        Ok(tick)
    }
}

/// Noise thresholds; zero disables them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub min_segment_m: f64,
    #[serde(default)]
    pub min_pace_distance_km: f64,
}

impl MetricsConfig {
    pub fn options(&self) -> MetricsOptions {
        MetricsOptions {
            min_segment_km: self.min_segment_m / 1000.0,
            min_pace_distance_km: self.min_pace_distance_km,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiKey {
    pub key: String,
    pub name: String,
    pub permissions: HashSet<Permission>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ReadMetrics,
    RecordRun,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.session.tick_interval()?;
        if invalid_threshold(config.metrics.min_segment_m) {
            return Err(ConfigError::InvalidThreshold("min_segment_m"));
        }
        if invalid_threshold(config.metrics.min_pace_distance_km) {
            return Err(ConfigError::InvalidThreshold("min_pace_distance_km"));
        }
        Ok(config)
    }

    pub fn find_api_key(&self, key: &str) -> Option<&ApiKey> {
        self.api_keys.iter().find(|k| k.key == key)
    }
}

fn invalid_threshold(value: f64) -> bool {
    value.is_nan() || value < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_str("{}").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.session.tick_interval().unwrap(), Duration::from_secs(1));
        assert_eq!(config.metrics.options(), MetricsOptions::default());
        assert!(config.api_keys.is_empty());
    }

    #[test]
    fn full_config() {
        let yaml = r#"
web:
  bind: 127.0.0.1:9000
session:
  tick: 500ms
metrics:
  min_segment_m: 3
  min_pace_distance_km: 0.05
api_keys:
  - key: secret
    name: phone
    permissions: [read_metrics, record_run]
"#;
        let config = Config::from_str(yaml).unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:9000");
        assert_eq!(
            config.session.tick_interval().unwrap(),
            Duration::from_millis(500)
        );
        let options = config.metrics.options();
        assert!((options.min_segment_km - 0.003).abs() < 1e-12);
        assert_eq!(options.min_pace_distance_km, 0.05);

        let key = config.find_api_key("secret").unwrap();
        assert_eq!(key.name, "phone");
        assert!(key.permissions.contains(&Permission::RecordRun));
        assert!(config.find_api_key("other").is_none());
    }

    #[test]
    fn zero_tick_is_rejected() {
        let err = Config::from_str("session:\n  tick: 0s\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTick(..)));
    }

    #[test]
    fn garbage_tick_is_rejected() {
        let err = Config::from_str("session:\n  tick: often\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTick(..)));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let err = Config::from_str("metrics:\n  min_segment_m: -1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold("min_segment_m")));
    }
}
