//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON formatting on stderr
//! - Optional daily-rolling JSON log files

/// Output format selection
pub mod config;
/// Subscriber installation
pub mod logger;

pub use config::LogFormat;
pub use logger::LoggerImpl;
