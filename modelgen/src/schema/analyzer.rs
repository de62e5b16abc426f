//! Database schema analyzer
//!
//! Turns raw introspection rows into [`TableDescription`]s.

use crate::db::source::{ColumnRow, SchemaSource};
use crate::error::{Error, Result};
use crate::schema::directive::OrderDirective;
use crate::schema::types::{ColumnDescriptor, KeyRole, TableDescription};

/// Key marker MySQL reports for primary-key columns
const PRIMARY_KEY_MARKER: &str = "PRI";

/// Normalize one raw column row
pub fn normalize_column(row: ColumnRow) -> ColumnDescriptor {
    let key = if row.column_key.eq_ignore_ascii_case(PRIMARY_KEY_MARKER) {
        KeyRole::Primary
    } else {
        KeyRole::None
    };

    ColumnDescriptor {
        name: row.field,
        raw_type: row.column_type,
        nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
        key,
        default: row.column_default,
        extra: row.extra.filter(|e| !e.is_empty()),
        comment: row.column_comment.filter(|c| !c.is_empty()),
    }
}

/// Build a table description from its raw rows, DDL and primary-key comment
pub fn normalize_table(
    name: &str,
    rows: Vec<ColumnRow>,
    create_statement: String,
    pk_comment: Option<&str>,
) -> TableDescription {
    let mut table = TableDescription::new(name);
    for row in rows {
        table.add_column(normalize_column(row));
    }
    table.create_statement = create_statement;

    let comment = pk_comment.or_else(|| {
        table
            .primary_key()
            .and_then(|column| column.comment.as_deref())
    });
    table.order = OrderDirective::resolve(name, comment);

    table
}

/// Schema analyzer for database schema introspection
pub struct SchemaAnalyzer<'a, S: SchemaSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: SchemaSource + Sync + ?Sized> SchemaAnalyzer<'a, S> {
    /// Create a new schema analyzer
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Describe every table in the schema, sorted by table name
    pub async fn analyze(&self) -> Result<Vec<TableDescription>> {
        let listed = self.source.introspect_tables().await?;
        if listed.is_empty() {
            return Err(Error::NoTables {
                schema: self.source.schema_name().to_string(),
            });
        }

        let mut names: Vec<&String> = listed.keys().collect();
        names.sort();

        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            let rows = self.source.describe_table(name).await?;
            if rows.is_empty() {
                return Err(Error::DatabaseError(format!(
                    "table `{}` reported no columns",
                    name
                )));
            }
            let create_statement = self.source.fetch_create_statement(name).await?;
            let comment = listed.get(name).and_then(|c| c.as_deref());

            tracing::debug!(table = name.as_str(), columns = rows.len(), "Described table");
            tables.push(normalize_table(name, rows, create_statement, comment));
        }

        Ok(tables)
    }
}
