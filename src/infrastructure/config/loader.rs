use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Unknown log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown log format
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// Pull factor outside (0, 1)
    #[error("Invalid pull_to_target: {0}. Must be between 0 and 1 (exclusive)")]
    InvalidPullToTarget(f64),

    /// Negative noise
    #[error("Invalid noise_fraction: {0}. Cannot be negative")]
    InvalidNoiseFraction(f64),

    /// Negative headroom
    #[error("Invalid headroom_amps: {0}. Cannot be negative")]
    InvalidHeadroom(f64),

    /// History that keeps nothing
    #[error("Invalid history_capacity: {0}. Must be at least 1")]
    InvalidHistoryCapacity(usize),

    /// Non-positive viewport
    #[error("Invalid viewport: {0}x{1}. Both dimensions must be positive")]
    InvalidViewport(f64, f64),

    /// Night band wider than half a day
    #[error("Invalid night_band: {0}. Must be at most 50")]
    InvalidNightBand(u8),

    /// A count or interval that must be positive
    #[error("Invalid {0}: must be greater than 0")]
    ZeroValue(&'static str),

    /// Several checks failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .shedwright/config.yaml (project config)
    /// 3. .shedwright/local.yaml (project local overrides, optional)
    /// 4. Environment variables (SHEDWRIGHT_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring
    /// environment overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("SHEDWRIGHT_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".shedwright/config.yaml"))
            .merge(Yaml::file(".shedwright/local.yaml"))
            .merge(Env::prefixed("SHEDWRIGHT_").split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if let Some(dir) = &config.logging.log_dir {
            if dir.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "logging.log_dir cannot be empty when set".to_string(),
                ));
            }
        }

        let telemetry = &config.telemetry;
        if !(telemetry.pull_to_target > 0.0 && telemetry.pull_to_target < 1.0) {
            return Err(ConfigError::InvalidPullToTarget(telemetry.pull_to_target));
        }
        if telemetry.noise_fraction < 0.0 || telemetry.noise_fraction.is_nan() {
            return Err(ConfigError::InvalidNoiseFraction(telemetry.noise_fraction));
        }
        if telemetry.headroom_amps < 0.0 || telemetry.headroom_amps.is_nan() {
            return Err(ConfigError::InvalidHeadroom(telemetry.headroom_amps));
        }
        if telemetry.history_capacity == 0 {
            return Err(ConfigError::InvalidHistoryCapacity(0));
        }
        if telemetry.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroValue("telemetry.tick_interval_ms"));
        }

        let weather = &config.weather;
        if !(weather.viewport_width > 0.0 && weather.viewport_height > 0.0) {
            return Err(ConfigError::InvalidViewport(
                weather.viewport_width,
                weather.viewport_height,
            ));
        }
        if weather.rain_population == 0 {
            return Err(ConfigError::ZeroValue("weather.rain_population"));
        }
        if weather.snow_population == 0 {
            return Err(ConfigError::ZeroValue("weather.snow_population"));
        }
        if weather.night_band > 50 {
            return Err(ConfigError::InvalidNightBand(weather.night_band));
        }
        if weather.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroValue("weather.frame_interval_ms"));
        }

        if config.assistant.timeout_ms == 0 {
            return Err(ConfigError::ZeroValue("assistant.timeout_ms"));
        }

        if config.insurance.baseline_annual_premium < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "insurance.baseline_annual_premium cannot be negative".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{LoggingConfig, TelemetryConfig, WeatherConfig};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.telemetry.history_capacity, 20);
        assert_eq!(config.weather.rain_population, 150);
        assert_eq!(config.weather.snow_population, 200);
        assert_eq!(config.assistant.timeout_ms, 30_000);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
logging:
  level: debug
  format: json
telemetry:
  pull_to_target: 0.25
  history_capacity: 40
weather:
  viewport_width: 800
  snow_population: 120
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert!((config.telemetry.pull_to_target - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.telemetry.history_capacity, 40);
        assert!((config.telemetry.noise_fraction - 0.05).abs() < f64::EPSILON);
        assert!((config.weather.viewport_width - 800.0).abs() < f64::EPSILON);
        assert_eq!(config.weather.snow_population, 120);
        assert_eq!(config.weather.rain_population, 150);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config {
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: "json".to_string(),
                log_dir: Some("/tmp/shedwright".to_string()),
            },
            telemetry: TelemetryConfig {
                pull_to_target: 0.5,
                ..Default::default()
            },
            weather: WeatherConfig {
                night_band: 50,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogFormat(format) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_pull_bounds() {
        for pull in [0.0, 1.0, -0.1, 1.5] {
            let mut config = Config::default();
            config.telemetry.pull_to_target = pull;
            assert!(matches!(
                ConfigLoader::validate(&config),
                Err(ConfigError::InvalidPullToTarget(_))
            ));
        }
    }

    #[test]
    fn test_validate_negative_noise() {
        let mut config = Config::default();
        config.telemetry.noise_fraction = -0.01;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidNoiseFraction(_))
        ));
    }

    #[test]
    fn test_validate_zero_history() {
        let mut config = Config::default();
        config.telemetry.history_capacity = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidHistoryCapacity(0))
        ));
    }

    #[test]
    fn test_validate_viewport() {
        let mut config = Config::default();
        config.weather.viewport_height = 0.0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidViewport(_, _))
        ));
    }

    #[test]
    fn test_validate_night_band() {
        let mut config = Config::default();
        config.weather.night_band = 51;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidNightBand(51))
        ));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.assistant.timeout_ms = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::ZeroValue("assistant.timeout_ms"))
        ));
    }

    #[test]
    fn test_env_override() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  level: info\ntelemetry:\n  history_capacity: 10").unwrap();
        file.flush().unwrap();

        temp_env::with_vars(
            [
                ("SHEDWRIGHT_LOGGING__LEVEL", Some("debug")),
                ("SHEDWRIGHT_TELEMETRY__HISTORY_CAPACITY", Some("32")),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.logging.level, "debug");
                assert_eq!(config.telemetry.history_capacity, 32);
            },
        );
    }

    #[test]
    fn test_invalid_file_value_is_rejected() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "weather:\n  night_band: 70").unwrap();
        file.flush().unwrap();

        let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("night_band"));
    }

    #[test]
    fn test_hierarchical_merging() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(
            base_file,
            "assistant:\n  timeout_ms: 5000\nlogging:\n  level: info\n  format: json"
        )
        .unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "assistant:\n  timeout_ms: 9000\nlogging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.assistant.timeout_ms, 9000, "Override should win");
        assert_eq!(
            config.logging.level, "debug",
            "Override should win for nested fields"
        );
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
    }
}
