//! Logging setup for modelgen
//!
//! `RUST_LOG` directives are honoured on top of the configured level.

use std::fs::File;
use std::path::Path;

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Parse a configured level name, defaulting to INFO
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let level = parse_level(&config.level);
    let directive = format!("modelgen={}", level)
        .parse()
        .map_err(|e| Error::ConfigError(format!("Invalid log level `{}`: {}", config.level, e)))?;

    Ok(EnvFilter::from_default_env().add_directive(directive))
}

fn is_json(config: &LoggingConfig) -> bool {
    config.format.eq_ignore_ascii_case("json")
}

fn install<S>(subscriber: S) -> Result<()>
where
    S: tracing::Subscriber + Send + Sync + 'static,
{
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::ConfigError(format!("Cannot install logger: {}", e)))
}

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(config)?;

    if let Some(file_path) = &config.file {
        if let Some(parent) = Path::new(file_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(file_path)?;

        if is_json(config) {
            install(
                fmt::Subscriber::builder()
                    .json()
                    .with_env_filter(env_filter)
                    .with_writer(file)
                    .finish(),
            )
        } else {
            install(
                fmt::Subscriber::builder()
                    .with_env_filter(env_filter)
                    .with_writer(file)
                    .with_ansi(false)
                    .finish(),
            )
        }
    } else if config.stdout {
        if is_json(config) {
            install(
                fmt::Subscriber::builder()
                    .json()
                    .with_env_filter(env_filter)
                    .finish(),
            )
        } else {
            install(fmt::Subscriber::builder().with_env_filter(env_filter).finish())
        }
    } else {
        Ok(())
    }
}
