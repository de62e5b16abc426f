//! Migration ordering
//!
//! Tables are ordered by the directive found on their primary-key column and
//! then by name, so an unchanged schema always plans the same sequence.

use crate::schema::types::TableDescription;

/// One table's place in the migration sequence
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMigration {
    pub table: String,
    pub create_statement: String,
    pub order: i64,
}

impl From<&TableDescription> for OrderedMigration {
    fn from(table: &TableDescription) -> Self {
        Self {
            table: table.name.clone(),
            create_statement: table.create_statement.clone(),
            order: table.order,
        }
    }
}

/// Plan the migration order for a set of tables
pub fn plan(tables: &[TableDescription]) -> Vec<OrderedMigration> {
    let mut planned: Vec<OrderedMigration> = tables.iter().map(OrderedMigration::from).collect();
    planned.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.table.cmp(&b.table)));

    for (index, migration) in planned.iter().enumerate() {
        tracing::debug!(
            position = index,
            table = migration.table.as_str(),
            order = migration.order,
            "Planned migration"
        );
    }

    planned
}
