//! Live operations configuration

use std::time::Duration;

use meshvault_core::{MeshError, MeshResult};
use meshvault_transfer::{DEFAULT_MIN_INCREMENT, MAX_INCREMENT};

use crate::LogFormat;

pub const ENV_FRAME_INTERVAL: &str = "MESHVAULT_FRAME_INTERVAL";
pub const ENV_TRANSFER_INTERVAL: &str = "MESHVAULT_TRANSFER_INTERVAL";
pub const ENV_MIN_INCREMENT: &str = "MESHVAULT_MIN_INCREMENT";
pub const ENV_SEED: &str = "MESHVAULT_SEED";
pub const ENV_LOG_FORMAT: &str = "MESHVAULT_LOG_FORMAT";

/// Live operations configuration
#[derive(Clone, Debug)]
pub struct LiveOpsConfig {
    /// Time between renderer ticks
    pub frame_interval: Duration,
    /// Time between simulator ticks
    pub transfer_interval: Duration,
    pub surface_width: u32,
    pub surface_height: u32,
    /// Smallest per-tick progress gain
    pub min_increment: f64,
    /// Seed for increments and digests; None draws from entropy
    pub seed: Option<u64>,
    pub log_format: LogFormat,
}

impl Default for LiveOpsConfig {
    fn default() -> Self {
        LiveOpsConfig {
            frame_interval: Duration::from_millis(16),
            transfer_interval: Duration::from_millis(200),
            surface_width: 500,
            surface_height: 400,
            min_increment: DEFAULT_MIN_INCREMENT,
            seed: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl LiveOpsConfig {
    /// Short intervals for tests and demos
    pub fn fast() -> Self {
        LiveOpsConfig {
            frame_interval: Duration::from_millis(1),
            transfer_interval: Duration::from_millis(5),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Defaults overridden by `MESHVAULT_*` environment variables
    pub fn from_env() -> MeshResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> MeshResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_FRAME_INTERVAL) {
            config.frame_interval = parse_duration(ENV_FRAME_INTERVAL, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TRANSFER_INTERVAL) {
            config.transfer_interval = parse_duration(ENV_TRANSFER_INTERVAL, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MIN_INCREMENT) {
            config.min_increment = raw.trim().parse().map_err(|e| {
                MeshError::InvalidConfig(format!("{ENV_MIN_INCREMENT}={raw}: {e}"))
            })?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw
                .trim()
                .parse()
                .map_err(|e| MeshError::InvalidConfig(format!("{ENV_SEED}={raw}: {e}")))?;
            config.seed = Some(seed);
        }
        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            config.log_format = raw.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MeshResult<()> {
        if self.frame_interval.is_zero() || self.transfer_interval.is_zero() {
            return Err(MeshError::InvalidConfig(
                "tick intervals must be non-zero".to_string(),
            ));
        }
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(MeshError::InvalidConfig(format!(
                "surface must have an area, got {}x{}",
                self.surface_width, self.surface_height
            )));
        }
        if !(self.min_increment > 0.0 && self.min_increment <= MAX_INCREMENT) {
            return Err(MeshError::InvalidConfig(format!(
                "min increment must be in (0, {MAX_INCREMENT}], got {}",
                self.min_increment
            )));
        }
        Ok(())
    }
}

fn parse_duration(key: &str, raw: &str) -> MeshResult<Duration> {
    humantime::parse_duration(raw.trim())
        .map_err(|e| MeshError::InvalidConfig(format!("{key}={raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_is_valid() {
        let config = LiveOpsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.transfer_interval, Duration::from_millis(200));
        assert_eq!((config.surface_width, config.surface_height), (500, 400));
    }

    #[test]
    fn test_lookup_overrides() {
        let config = LiveOpsConfig::from_lookup(lookup(&[
            (ENV_FRAME_INTERVAL, "33ms"),
            (ENV_TRANSFER_INTERVAL, "1s 500ms"),
            (ENV_MIN_INCREMENT, "2.5"),
            (ENV_SEED, "42"),
            (ENV_LOG_FORMAT, "json"),
        ]))
        .unwrap();

        assert_eq!(config.frame_interval, Duration::from_millis(33));
        assert_eq!(config.transfer_interval, Duration::from_millis(1500));
        assert_eq!(config.min_increment, 2.5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_bad_values_rejected() {
        let bad = [
            (ENV_TRANSFER_INTERVAL, "soon"),
            (ENV_FRAME_INTERVAL, "0ms"),
            (ENV_MIN_INCREMENT, "0"),
            (ENV_MIN_INCREMENT, "16"),
            (ENV_MIN_INCREMENT, "NaN"),
            (ENV_SEED, "-1"),
            (ENV_LOG_FORMAT, "xml"),
        ];
        for (key, value) in bad {
            let result = LiveOpsConfig::from_lookup(lookup(&[(key, value)]));
            assert!(
                matches!(result, Err(MeshError::InvalidConfig(_))),
                "{key}={value} should be rejected"
            );
        }
    }

    #[test]
    fn test_fast_preset() {
        let config = LiveOpsConfig::fast().with_seed(3);
        assert!(config.validate().is_ok());
        assert!(config.frame_interval < config.transfer_interval);
        assert_eq!(config.seed, Some(3));
    }
}
