//! Connection string parsing
//!
//! `user:pass@host:port` is split into its parts and handed to sqlx as
//! [`MySqlConnectOptions`], so a password may contain any character.

use sqlx::mysql::MySqlConnectOptions;

use crate::error::{Error, Result};

/// The parts of a `user:pass@host:port` connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl ConnectionString {
    /// Split a connection string; the password ends at the last `@`
    pub fn parse(connection: &str) -> Result<Self> {
        let invalid = || {
            Error::ConfigError(format!(
                "invalid connection string format `{}`, expected user:pass@host:port",
                connection
            ))
        };

        let (credentials, address) = connection.rsplit_once('@').ok_or_else(invalid)?;
        let (user, password) = credentials.split_once(':').ok_or_else(invalid)?;
        let (host, port) = address.rsplit_once(':').ok_or_else(invalid)?;
        let port = port.parse::<u16>().map_err(|_| invalid())?;

        if user.is_empty() || host.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            user: user.to_string(),
            password: password.to_string(),
            host: host.to_string(),
            port,
        })
    }

    /// Connect options for `database` on this server
    pub fn connect_options(&self, database: &str) -> Result<MySqlConnectOptions> {
        if database.is_empty() {
            return Err(Error::ConfigError("database name cannot be empty".to_string()));
        }

        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(database);

        Ok(if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        })
    }
}

/// Connect options for a `user:pass@host:port` connection string and a database name
pub fn connect_options(connection: &str, database: &str) -> Result<MySqlConnectOptions> {
    ConnectionString::parse(connection)?.connect_options(database)
}
