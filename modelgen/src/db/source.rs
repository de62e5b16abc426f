//! Schema introspection queries
//!
//! [`SchemaSource`] is the seam between the generator and the database. The
//! MySQL implementation reads `information_schema` and `SHOW CREATE TABLE`;
//! tests plug in an in-memory source.

use async_trait::async_trait;
use sqlx::{FromRow, Row};
use std::collections::HashMap;

use crate::db::connection::DatabaseConnection;
use crate::error::{Error, Result};
use crate::utils::naming::quote_identifier;

/// One raw column row as the engine reports it
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct ColumnRow {
    pub field: String,
    pub column_type: String,
    pub is_nullable: String,
    pub column_key: String,
    pub column_default: Option<String>,
    pub extra: Option<String>,
    pub column_comment: Option<String>,
}

/// Source of schema metadata
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Name of the schema being inspected
    fn schema_name(&self) -> &str;

    /// List the schema's tables with the comment on each primary-key column
    async fn introspect_tables(&self) -> Result<HashMap<String, Option<String>>>;

    /// Describe a table's columns in physical order
    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnRow>>;

    /// Fetch the engine's full creation DDL for a table
    async fn fetch_create_statement(&self, table: &str) -> Result<String>;
}

#[derive(FromRow)]
struct TableRow {
    table_name: String,
    column_comment: Option<String>,
}

/// One entry per table; with a composite key the first key column's comment wins
fn fold_table_rows(rows: Vec<TableRow>) -> HashMap<String, Option<String>> {
    let mut tables = HashMap::new();
    for row in rows {
        let comment = row.column_comment.filter(|c| !c.is_empty());
        tables.entry(row.table_name).or_insert(comment);
    }
    tables
}

/// MySQL schema source
pub struct MySqlSource {
    connection: DatabaseConnection,
}

impl MySqlSource {
    /// Create a new source over an open connection
    pub fn new(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}

#[async_trait]
impl SchemaSource for MySqlSource {
    fn schema_name(&self) -> &str {
        self.connection.schema()
    }

    async fn introspect_tables(&self) -> Result<HashMap<String, Option<String>>> {
        // information_schema text columns come back as binary on some servers,
        // so everything is cast to CHAR.
        let sql = r#"
            SELECT
                CAST(t.table_name AS CHAR) AS table_name,
                CAST(c.column_comment AS CHAR) AS column_comment
            FROM information_schema.tables AS t
            LEFT JOIN information_schema.columns AS c
                ON c.table_schema = t.table_schema
                AND c.table_name = t.table_name
                AND c.column_key = 'PRI'
            WHERE t.table_schema = ?
                AND t.table_type = 'BASE TABLE'
            ORDER BY t.table_name, c.ordinal_position
        "#;

        let rows = sqlx::query_as::<_, TableRow>(sql)
            .bind(self.connection.schema())
            .fetch_all(self.connection.pool())
            .await?;

        let tables = fold_table_rows(rows);

        tracing::debug!(
            schema = self.connection.schema(),
            count = tables.len(),
            "Listed tables"
        );

        Ok(tables)
    }

    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnRow>> {
        let sql = r#"
            SELECT
                CAST(column_name AS CHAR) AS field,
                CAST(column_type AS CHAR) AS column_type,
                CAST(is_nullable AS CHAR) AS is_nullable,
                CAST(column_key AS CHAR) AS column_key,
                CAST(column_default AS CHAR) AS column_default,
                CAST(extra AS CHAR) AS extra,
                CAST(column_comment AS CHAR) AS column_comment
            FROM information_schema.columns
            WHERE table_schema = ? AND table_name = ?
            ORDER BY ordinal_position
        "#;

        let rows = sqlx::query_as::<_, ColumnRow>(sql)
            .bind(self.connection.schema())
            .bind(table)
            .fetch_all(self.connection.pool())
            .await?;

        Ok(rows)
    }

    async fn fetch_create_statement(&self, table: &str) -> Result<String> {
        let sql = format!("SHOW CREATE TABLE {}", quote_identifier(table));
        let row = sqlx::query(&sql)
            .fetch_one(self.connection.pool())
            .await?;

        // Columns are `Table` and `Create Table`
        let statement: String = row.try_get(1).map_err(|e| {
            Error::DatabaseError(format!("cannot read create statement for `{}`: {}", table, e))
        })?;

        Ok(statement)
    }
}
