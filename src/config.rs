use crate::error::{Result, TourError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Largest accepted count, buffer size or term count.
pub const MAX_COUNT: u64 = 100_000;
/// Largest accepted read buffer, in bytes.
pub const MAX_READ_CHUNK: u64 = 64 * 1024;
/// Largest accepted delay or timer, in milliseconds.
pub const MAX_MILLIS: u64 = 60_000;

/// Tunable parameters of the concurrency sections. Every key is optional in
/// the TOML file; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TourConfig {
    pub counter_increments: usize,
    pub fib_buffer: usize,
    pub select_terms: usize,
    pub say_repeats: usize,
    pub say_delay_ms: u64,
    pub tick_ms: u64,
    pub boom_ms: u64,
    pub idle_ms: u64,
    pub read_chunk: usize,
}

impl Default for TourConfig {
    fn default() -> Self {
        TourConfig {
            counter_increments: 1000,
            fib_buffer: 10,
            select_terms: 10,
            say_repeats: 5,
            say_delay_ms: 100,
            tick_ms: 100,
            boom_ms: 500,
            idle_ms: 50,
            read_chunk: 8,
        }
    }
}

impl TourConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: TourConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| TourError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Self::from_toml(&content)
    }

    /// Reads `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("fib_buffer", self.fib_buffer as u64),
            ("read_chunk", self.read_chunk as u64),
            ("tick_ms", self.tick_ms),
            ("boom_ms", self.boom_ms),
            ("idle_ms", self.idle_ms),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(TourError::invalid_config(field, "must be greater than zero"));
            }
        }

        let capped = [
            ("counter_increments", self.counter_increments as u64, MAX_COUNT),
            ("fib_buffer", self.fib_buffer as u64, MAX_COUNT),
            ("select_terms", self.select_terms as u64, MAX_COUNT),
            ("say_repeats", self.say_repeats as u64, MAX_COUNT),
            ("read_chunk", self.read_chunk as u64, MAX_READ_CHUNK),
            ("say_delay_ms", self.say_delay_ms, MAX_MILLIS),
            ("tick_ms", self.tick_ms, MAX_MILLIS),
            ("boom_ms", self.boom_ms, MAX_MILLIS),
            ("idle_ms", self.idle_ms, MAX_MILLIS),
        ];
        for (field, value, max) in capped {
            if value > max {
                return Err(TourError::invalid_config(field, format!("must be at most {max}")));
            }
        }
        Ok(())
    }

    pub fn say_delay(&self) -> Duration {
        Duration::from_millis(self.say_delay_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn boom(&self) -> Duration {
        Duration::from_millis(self.boom_ms)
    }

    pub fn idle(&self) -> Duration {
        Duration::from_millis(self.idle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = TourConfig::from_toml("").unwrap();
        assert_eq!(config, TourConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = TourConfig::from_toml("tick_ms = 10\nboom_ms = 35\n").unwrap();
        assert_eq!(config.tick(), Duration::from_millis(10));
        assert_eq!(config.boom(), Duration::from_millis(35));
        assert_eq!(config.counter_increments, 1000);
        assert_eq!(config.idle_ms, 50);
    }

    #[test]
    fn test_zero_values_rejected() {
        let err = TourConfig::from_toml("fib_buffer = 0").unwrap_err();
        assert!(matches!(err, TourError::InvalidConfig { ref field, .. } if field == "fib_buffer"));

        let err = TourConfig::from_toml("idle_ms = 0").unwrap_err();
        assert!(matches!(err, TourError::InvalidConfig { ref field, .. } if field == "idle_ms"));
    }

    #[test]
    fn test_upper_bounds_rejected() {
        let err = TourConfig::from_toml("counter_increments = 10000000").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for config field 'counter_increments': must be at most 100000"
        );

        let err = TourConfig::from_toml("fib_buffer = 100001").unwrap_err();
        assert!(matches!(err, TourError::InvalidConfig { ref field, .. } if field == "fib_buffer"));

        let err = TourConfig::from_toml("boom_ms = 60001").unwrap_err();
        assert!(matches!(err, TourError::InvalidConfig { ref field, .. } if field == "boom_ms"));
    }

    #[test]
    fn test_upper_bounds_inclusive() {
        let config = TourConfig::from_toml("select_terms = 100000\nread_chunk = 65536").unwrap();
        assert_eq!(config.select_terms, 100_000);
        assert_eq!(config.read_chunk, 65_536);
    }

    #[test]
    fn test_zero_increments_allowed() {
        let config = TourConfig::from_toml("counter_increments = 0").unwrap();
        assert_eq!(config.counter_increments, 0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = TourConfig::from_toml("tick = 3").unwrap_err();
        assert!(matches!(err, TourError::ConfigParse(_)));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let err = TourConfig::from_toml("tick_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, TourError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "counter_increments = 42").unwrap();
        writeln!(file, "select_terms = 3").unwrap();

        let config = TourConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.counter_increments, 42);
        assert_eq!(config.select_terms, 3);
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(TourConfig::load(None).unwrap(), TourConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = TourConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, TourError::ConfigRead { .. }));
    }
}
