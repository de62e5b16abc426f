//! Type definitions for introspected schema objects

use serde::{Deserialize, Serialize};

/// Role a column plays in the table's key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum KeyRole {
    Primary,
    #[default]
    None,
}

/// One physical column as reported by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub raw_type: String,
    pub nullable: bool,
    pub key: KeyRole,
    pub default: Option<String>,
    pub extra: Option<String>,
    pub comment: Option<String>,
}

impl ColumnDescriptor {
    /// Create a new non-null column with the given name and raw engine type
    pub fn new(name: &str, raw_type: &str) -> Self {
        Self {
            name: name.to_string(),
            raw_type: raw_type.to_string(),
            nullable: false,
            key: KeyRole::None,
            default: None,
            extra: None,
            comment: None,
        }
    }

    /// Set whether the column is nullable
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Mark the column as the table's primary key
    pub fn primary(mut self) -> Self {
        self.key = KeyRole::Primary;
        self
    }

    /// Attach a free-text comment
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn is_primary(&self) -> bool {
        self.key == KeyRole::Primary
    }
}

/// A table's identity, its columns in physical order, and its creation DDL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDescription {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub create_statement: String,
    /// Migration ordering key taken from the primary-key column's comment
    pub order: i64,
}

impl TableDescription {
    /// Create a new table with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            create_statement: String::new(),
            order: 0,
        }
    }

    /// Add a column to the table
    pub fn add_column(&mut self, column: ColumnDescriptor) {
        self.columns.push(column);
    }

    /// The column flagged as primary key, if any
    pub fn primary_key(&self) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.is_primary())
    }
}
