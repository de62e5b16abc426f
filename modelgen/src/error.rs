//! Error types for modelgen

use std::path::PathBuf;

use thiserror::Error;

/// Result type for modelgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for modelgen
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unrecognized column type: {0}")]
    UnrecognizedType(String),

    /// A column-level failure, tagged with the table and column it came from
    #[error("Table `{table}`, column `{column}`: {source}")]
    ColumnError {
        table: String,
        column: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("No tables found in schema `{schema}`")]
    NoTables { schema: String },

    #[error("Cannot archive {}: {source}", .path.display())]
    ArchiveError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl Error {
    /// Tag an error with the table and column that produced it
    pub fn in_column(self, table: &str, column: &str) -> Self {
        Error::ColumnError {
            table: table.to_string(),
            column: column.to_string(),
            source: Box::new(self),
        }
    }

    /// Whether the error is a configuration problem rather than an environment one
    pub fn is_configuration(&self) -> bool {
        match self {
            Error::ConfigError(_) | Error::UnrecognizedType(_) | Error::TemplateError(_) => true,
            Error::ColumnError { source, .. } => source.is_configuration(),
            _ => false,
        }
    }
}

/// Convert Serde JSON errors to modelgen errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert TOML deserialization errors to modelgen errors
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_error_names_table_and_column() {
        let err = Error::UnrecognizedType("geometry".to_string()).in_column("places", "shape");
        let msg = err.to_string();

        assert!(msg.contains("places"));
        assert!(msg.contains("shape"));
        assert!(msg.contains("geometry"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_environment_errors_are_not_configuration() {
        let err = Error::NoTables { schema: "shop".to_string() };
        assert!(!err.is_configuration());
        assert_eq!(err.to_string(), "No tables found in schema `shop`");
    }
}
