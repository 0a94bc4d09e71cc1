use serde::{Deserialize, Serialize};

/// Main configuration structure for Shedwright
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Power telemetry simulator settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Weather particle simulator settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Assistant request settings
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Simulated insurance partner settings
    #[serde(default)]
    pub insurance: InsuranceConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files. Stderr only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

/// Power telemetry simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TelemetryConfig {
    /// Fraction of the remaining gap to target closed per tick, in (0, 1)
    #[serde(default = "default_pull_to_target")]
    pub pull_to_target: f64,

    /// Peak-to-peak noise as a fraction of the kit rating
    #[serde(default = "default_noise_fraction")]
    pub noise_fraction: f64,

    /// Amps allowed above the rating before the reading is clamped
    #[serde(default = "default_headroom_amps")]
    pub headroom_amps: f64,

    /// Samples kept for the sparkline
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Tick interval for the async driver
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

const fn default_pull_to_target() -> f64 {
    0.1
}

const fn default_noise_fraction() -> f64 {
    0.05
}

const fn default_headroom_amps() -> f64 {
    0.5
}

const fn default_history_capacity() -> usize {
    20
}

const fn default_tick_interval_ms() -> u64 {
    2000
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            pull_to_target: default_pull_to_target(),
            noise_fraction: default_noise_fraction(),
            headroom_amps: default_headroom_amps(),
            history_capacity: default_history_capacity(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Weather particle simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WeatherConfig {
    /// Viewport width in pixels
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,

    /// Viewport height in pixels
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,

    /// Particles kept alive while raining
    #[serde(default = "default_rain_population")]
    pub rain_population: usize,

    /// Particles kept alive while snowing
    #[serde(default = "default_snow_population")]
    pub snow_population: usize,

    /// Distance above the viewport at which particles respawn
    #[serde(default = "default_spawn_offset")]
    pub spawn_offset: f64,

    /// Distance below the viewport a particle may fall before respawning
    #[serde(default = "default_exit_margin")]
    pub exit_margin: f64,

    /// Width of the night band at each end of the 0-100 time range
    #[serde(default = "default_night_band")]
    pub night_band: u8,

    /// Frame interval for the async driver
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

const fn default_viewport_width() -> f64 {
    1280.0
}

const fn default_viewport_height() -> f64 {
    720.0
}

const fn default_rain_population() -> usize {
    150
}

const fn default_snow_population() -> usize {
    200
}

const fn default_spawn_offset() -> f64 {
    20.0
}

const fn default_exit_margin() -> f64 {
    50.0
}

const fn default_night_band() -> u8 {
    20
}

const fn default_frame_interval_ms() -> u64 {
    16
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            rain_population: default_rain_population(),
            snow_population: default_snow_population(),
            spawn_offset: default_spawn_offset(),
            exit_margin: default_exit_margin(),
            night_band: default_night_band(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

/// Assistant request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AssistantConfig {
    /// Give up on a proposal after this long
    #[serde(default = "default_assistant_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_assistant_timeout_ms() -> u64 {
    30_000
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_assistant_timeout_ms(),
        }
    }
}

/// Simulated insurance partner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InsuranceConfig {
    /// Simulated round-trip latency for a quote
    #[serde(default = "default_quote_latency_ms")]
    pub quote_latency_ms: u64,

    /// Annual homeowner premium the savings are computed against
    #[serde(default = "default_baseline_premium")]
    pub baseline_annual_premium: f64,
}

const fn default_quote_latency_ms() -> u64 {
    2500
}

const fn default_baseline_premium() -> f64 {
    1200.0
}

impl Default for InsuranceConfig {
    fn default() -> Self {
        Self {
            quote_latency_ms: default_quote_latency_ms(),
            baseline_annual_premium: default_baseline_premium(),
        }
    }
}
