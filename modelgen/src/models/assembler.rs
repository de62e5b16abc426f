//! Table model assembly
//!
//! Combines a [`TableDescription`] with mapped column types into the
//! render-ready [`TableModel`].

use std::collections::BTreeSet;

use crate::error::Result;
use crate::models::types::{map_type, Dependency, MappedType, TypeCategory};
use crate::schema::types::TableDescription;
use crate::utils::naming::{generate_unique_name, to_field_name, to_type_name};

/// Column name of the conventional auto-assigned key
pub const IDENTITY_COLUMN: &str = "id";

/// Column name of the insert-time audit timestamp
pub const CREATED_AT_COLUMN: &str = "created_at";

/// Column name of the update-time audit timestamp
pub const UPDATED_AT_COLUMN: &str = "updated_at";

/// What a field means to the generated insert/update/upsert statements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// `id`: assigned by the engine, never inserted explicitly
    Identity,
    /// `created_at`: set to now on insert, never changed afterwards
    CreatedTimestamp,
    /// `updated_at`: set to now on every update
    UpdatedTimestamp,
    Ordinary,
}

impl FieldRole {
    /// Resolve a column's role from its exact name
    pub fn for_column(column: &str) -> Self {
        match column {
            IDENTITY_COLUMN => FieldRole::Identity,
            CREATED_AT_COLUMN => FieldRole::CreatedTimestamp,
            UPDATED_AT_COLUMN => FieldRole::UpdatedTimestamp,
            _ => FieldRole::Ordinary,
        }
    }
}

/// One field of a generated model
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Rust identifier
    pub name: String,
    pub ty: MappedType,
    /// Column name as the engine reports it
    pub column: String,
    pub nullable: bool,
    pub role: FieldRole,
}

/// The model's primary key
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKey {
    /// Rust identifier of the key field
    pub field: String,
    pub column: String,
    pub ty: MappedType,
    /// False when the table has no key column and the `id` fallback is used
    pub exists: bool,
}

/// Render-ready projection of a table
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    /// Rust type name
    pub name: String,
    /// Table name as the engine reports it
    pub table_name: String,
    pub fields: Vec<Field>,
    pub primary_key: PrimaryKey,
    pub dependencies: BTreeSet<Dependency>,
}

impl TableModel {
    /// The field acting as the engine-assigned identity, if any
    pub fn identity(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.role == FieldRole::Identity)
    }

    /// Whether the key refers to a field of this model
    ///
    /// Only false for a keyless table that also has no `id` column.
    pub fn has_key_field(&self) -> bool {
        self.primary_key.exists || self.fields.iter().any(|f| f.name == self.primary_key.field)
    }

    /// Whether the insert should read the generated key back
    pub fn has_int_pk(&self) -> bool {
        self.primary_key.ty == MappedType::new(TypeCategory::Integer, false)
    }
}

/// Assemble a render-ready model from a table description
pub fn assemble(table: &TableDescription) -> Result<TableModel> {
    let mut fields = Vec::with_capacity(table.columns.len());
    let mut dependencies = BTreeSet::new();
    let mut primary_key: Option<PrimaryKey> = None;
    let mut taken: Vec<String> = Vec::with_capacity(table.columns.len());

    for column in &table.columns {
        let ty = map_type(&column.raw_type, column.nullable)
            .map_err(|e| e.in_column(&table.name, &column.name))?;

        if let Some(dependency) = ty.dependency() {
            dependencies.insert(dependency);
        }

        // `UserName` and `user_name` both map to `user_name`
        let name = generate_unique_name(&to_field_name(&column.name), &taken);
        taken.push(name.clone());

        let field = Field {
            name,
            ty,
            column: column.name.clone(),
            nullable: column.nullable,
            role: FieldRole::for_column(&column.name),
        };

        if column.is_primary() {
            match &primary_key {
                None => {
                    primary_key = Some(PrimaryKey {
                        field: field.name.clone(),
                        column: field.column.clone(),
                        ty,
                        exists: true,
                    });
                }
                Some(existing) => {
                    tracing::warn!(
                        table = table.name.as_str(),
                        column = column.name.as_str(),
                        key = existing.column.as_str(),
                        "Composite primary key, only the first column is used"
                    );
                }
            }
        }

        fields.push(field);
    }

    let primary_key = primary_key.unwrap_or_else(|| {
        tracing::debug!(table = table.name.as_str(), "No primary key, falling back to `id`");
        PrimaryKey {
            field: to_field_name(IDENTITY_COLUMN),
            column: IDENTITY_COLUMN.to_string(),
            ty: MappedType::new(TypeCategory::Integer, false),
            exists: false,
        }
    });

    Ok(TableModel {
        name: to_type_name(&table.name),
        table_name: table.name.clone(),
        fields,
        primary_key,
        dependencies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::schema::types::ColumnDescriptor;
    use pretty_assertions::assert_eq;

    fn orders() -> TableDescription {
        let mut table = TableDescription::new("order_items");
        table.add_column(ColumnDescriptor::new("id", "int(10) unsigned").primary());
        table.add_column(ColumnDescriptor::new("sku", "varchar(64)"));
        table.add_column(ColumnDescriptor::new("placed_at", "datetime").nullable(true));
        table.add_column(ColumnDescriptor::new("shipped_at", "datetime"));
        table.add_column(ColumnDescriptor::new("created_at", "timestamp"));
        table.add_column(ColumnDescriptor::new("updated_at", "timestamp").nullable(true));
        table
    }

    #[test]
    fn test_assemble_preserves_column_order() {
        let model = assemble(&orders()).unwrap();
        let columns: Vec<&str> = model.fields.iter().map(|f| f.column.as_str()).collect();

        assert_eq!(
            columns,
            vec!["id", "sku", "placed_at", "shipped_at", "created_at", "updated_at"]
        );
        assert_eq!(model.name, "OrderItems");
        assert_eq!(model.table_name, "order_items");
    }

    #[test]
    fn test_roles_are_resolved_from_column_names() {
        let model = assemble(&orders()).unwrap();
        let roles: Vec<FieldRole> = model.fields.iter().map(|f| f.role).collect();

        assert_eq!(
            roles,
            vec![
                FieldRole::Identity,
                FieldRole::Ordinary,
                FieldRole::Ordinary,
                FieldRole::Ordinary,
                FieldRole::CreatedTimestamp,
                FieldRole::UpdatedTimestamp,
            ]
        );
    }

    #[test]
    fn test_dependencies_are_deduplicated() {
        let model = assemble(&orders()).unwrap();
        assert_eq!(model.dependencies.len(), 1);
        assert!(model.dependencies.contains(&Dependency::Chrono));
    }

    #[test]
    fn test_detected_primary_key() {
        let mut table = TableDescription::new("countries");
        table.add_column(ColumnDescriptor::new("code", "char(2)").primary());
        table.add_column(ColumnDescriptor::new("name", "varchar(100)"));

        let model = assemble(&table).unwrap();
        assert_eq!(model.primary_key.column, "code");
        assert_eq!(model.primary_key.ty, MappedType::new(TypeCategory::Text, false));
        assert!(model.primary_key.exists);
        assert!(!model.has_int_pk());
        assert!(model.identity().is_none());
    }

    #[test]
    fn test_keyless_table_falls_back_to_id() {
        let mut table = TableDescription::new("audit");
        table.add_column(ColumnDescriptor::new("message", "text"));
        table.add_column(ColumnDescriptor::new("payload", "json").nullable(true));

        let model = assemble(&table).unwrap();
        assert_eq!(model.primary_key.column, "id");
        assert_eq!(model.primary_key.field, "id");
        assert_eq!(model.primary_key.ty, MappedType::new(TypeCategory::Integer, false));
        assert!(!model.primary_key.exists);
        assert!(!model.has_key_field());
        assert!(model.dependencies.contains(&Dependency::SerdeJson));
    }

    #[test]
    fn test_keyless_table_with_id_column_keeps_key_field() {
        let mut table = TableDescription::new("events");
        table.add_column(ColumnDescriptor::new("id", "bigint(20)"));
        table.add_column(ColumnDescriptor::new("name", "varchar(64)"));

        let model = assemble(&table).unwrap();
        assert!(!model.primary_key.exists);
        assert!(model.has_key_field());
        assert!(assemble(&orders()).unwrap().has_key_field());
    }

    #[test]
    fn test_colliding_field_names_are_suffixed() {
        let mut table = TableDescription::new("people");
        table.add_column(ColumnDescriptor::new("user_name", "varchar(32)"));
        table.add_column(ColumnDescriptor::new("UserName", "varchar(32)"));

        let model = assemble(&table).unwrap();
        let names: Vec<&str> = model.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["user_name", "user_name_1"]);
        assert_eq!(model.fields[1].column, "UserName");
    }

    #[test]
    fn test_unrecognized_type_is_tagged_with_table_and_column() {
        let mut table = TableDescription::new("places");
        table.add_column(ColumnDescriptor::new("id", "int(11)").primary());
        table.add_column(ColumnDescriptor::new("shape", "geometry"));

        match assemble(&table) {
            Err(Error::ColumnError { table, column, source }) => {
                assert_eq!(table, "places");
                assert_eq!(column, "shape");
                assert!(matches!(*source, Error::UnrecognizedType(_)));
            }
            other => panic!("expected a column error, got {:?}", other),
        }
    }
}
