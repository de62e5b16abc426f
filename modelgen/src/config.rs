//! Configuration handling for modelgen

use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::{Error, Result};

/// Default package identifier substituted into generated files
pub const DEFAULT_PACKAGE: &str = "generated_models";

/// Default output directory
pub const DEFAULT_OUTPUT: &str = "generated_models";

/// Load configuration from a TOML file
pub fn load_from_file(path: &str) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| Error::ConfigError(format!("Failed to read config file: {}", e)))?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;

    Ok(config)
}

/// Represents the complete modelgen configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub migrations: MigrationsConfig,
    pub logging: Option<LoggingConfig>,
}

impl Config {
    /// Check that everything needed to reach the database is present
    pub fn validate(&self) -> Result<()> {
        if self.database.name.trim().is_empty() {
            return Err(Error::ConfigError("Please provide a database name".to_string()));
        }

        if self.database.connection.trim().is_empty() {
            return Err(Error::ConfigError(
                "Please provide a connection string".to_string(),
            ));
        }

        if self.output.package.trim().is_empty() {
            return Err(Error::ConfigError("Package name cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// Database connection configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Connection string in the form `user:pass@host:port`
    #[serde(default)]
    pub connection: String,
    /// Schema (database) whose tables are inspected
    #[serde(default)]
    pub name: String,
    pub timeout_seconds: Option<u64>,
}

/// Generated model output configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output")]
    pub directory: String,
    #[serde(default = "default_package")]
    pub package: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output(),
            package: default_package(),
        }
    }
}

/// Migration script output configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MigrationsConfig {
    #[serde(default = "default_output")]
    pub directory: String,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            directory: default_output(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub format: String,
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            format: "text".to_string(),
            stdout: true,
        }
    }
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_package() -> String {
    DEFAULT_PACKAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_config() -> Config {
        let config_str = r###"
        [database]
        connection = "root:secret@localhost:3306"
        name = "shop"
        timeout_seconds = 10

        [output]
        directory = "./models"
        package = "models"

        [migrations]
        directory = "./migrations"

        [logging]
        level = "debug"
        format = "json"
        stdout = true
        "###;

        toml::from_str(config_str).expect("Failed to parse test config")
    }

    #[test]
    fn test_config_loading() {
        let config = test_config();

        assert_eq!(config.database.name, "shop");
        assert_eq!(config.output.package, "models");
        assert_eq!(config.migrations.directory, "./migrations");
        assert_eq!(config.logging.unwrap().level, "debug");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[database]\nname = \"shop\"\n").unwrap();

        assert_eq!(config.output.directory, DEFAULT_OUTPUT);
        assert_eq!(config.output.package, DEFAULT_PACKAGE);
        assert_eq!(config.migrations.directory, DEFAULT_OUTPUT);
        assert!(config.logging.is_none());
    }

    #[test]
    fn test_validate_requires_connection_details() {
        let mut config = test_config();
        assert!(config.validate().is_ok());

        config.database.connection.clear();
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("database name"));
    }
}
