//! modelgen: typed data-access modules and migrations from a live MySQL schema
//!
//! modelgen reads a schema's tables through `information_schema`, maps every
//! column onto a Rust type and writes one `sqlx` model module per table. The
//! same introspection also produces ordered up/down migration scripts.

pub mod config;
pub mod db;
pub mod error;
pub mod generator;
pub mod migrations;
pub mod models;
pub mod output;
pub mod render;
pub mod schema;
pub mod support;
pub mod utils;

// Re-export main types for easier access
pub use config::Config;
pub use db::connection::DatabaseConnection;
pub use db::source::{MySqlSource, SchemaSource};
pub use error::{Error, Result};
pub use generator::ModelGenerator;
pub use migrations::MigrationWriter;
pub use output::GenerationReport;
pub use schema::analyzer::SchemaAnalyzer;

/// Initialize modelgen with the specified configuration file
pub async fn init(config_path: &str) -> Result<ModelgenClient> {
    let config = config::load_from_file(config_path)?;
    ModelgenClient::new(config).await
}

/// The main client for running modelgen against a database
pub struct ModelgenClient {
    config: Config,
    source: MySqlSource,
}

impl ModelgenClient {
    /// Validate the configuration and connect to the database
    pub async fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let connection = DatabaseConnection::connect(&config.database).await?;

        Ok(Self {
            config,
            source: MySqlSource::new(connection),
        })
    }

    /// Generate one model module per table into the output directory
    pub async fn generate_models(&self) -> Result<GenerationReport> {
        ModelGenerator::new(&self.config.output)?
            .run(&self.source)
            .await
    }

    /// Write ordered migration scripts into the migrations directory
    pub async fn generate_migrations(&self) -> Result<GenerationReport> {
        MigrationWriter::new(&self.config.migrations)
            .run(&self.source)
            .await
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the schema source
    pub fn source(&self) -> &MySqlSource {
        &self.source
    }

    /// Release the database connection
    pub async fn close(&self) {
        self.source.connection().close().await;
    }
}
