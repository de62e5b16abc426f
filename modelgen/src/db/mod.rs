//! Database module for modelgen
//!
//! This module handles the connection and the introspection queries.

pub mod connection;
pub mod dsn;
pub mod source;

// Re-export key types
pub use connection::DatabaseConnection;
pub use source::{ColumnRow, MySqlSource, SchemaSource};
