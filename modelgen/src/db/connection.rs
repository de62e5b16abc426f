//! Database connection handling
//!
//! The whole run shares one connection, acquired up front and held until the
//! run finishes.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::config::DatabaseConfig;
use crate::db::dsn::connect_options;
use crate::error::{Error, Result};

/// A connection to the schema being inspected
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    pool: MySqlPool,
    schema: String,
}

impl DatabaseConnection {
    /// Create a new database connection from configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let timeout_seconds = config.timeout_seconds.unwrap_or(30);
        let options = connect_options(&config.connection, &config.name)?;

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| Error::DatabaseError(format!("cannot connect to `{}`: {}", config.name, e)))?;

        tracing::info!(database = config.name.as_str(), "Connected to database");

        Ok(Self {
            pool,
            schema: config.name.clone(),
        })
    }

    /// The schema (database) name this connection inspects
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Release the connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
