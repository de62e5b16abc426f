//! Statement fragments for a table model
//!
//! Column lists, placeholder lists and bind lists for the same statement are
//! derived from the same [`FieldRole`] rules, so their lengths always agree.

use crate::models::assembler::{Field, FieldRole, TableModel};
use crate::models::types::TypeCategory;
use crate::utils::naming::quote_identifier;

const FIELD_INDENT: &str = "    ";
const SCAN_INDENT: &str = "            ";
const BIND_INDENT: &str = "            ";
const BODY_INDENT: &str = "        ";

/// Path of the support module as seen from a generated table module
const SUPPORT_PATH: &str = "super::x_helpers";

const NOW: &str = "NOW()";
const UTC_NOW: &str = "UTC_TIMESTAMP()";

fn bind(field: &str) -> String {
    format!("{}.bind(&self.{})", BIND_INDENT, field)
}

fn binds<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = &'a Field>,
{
    fields
        .into_iter()
        .map(|f| bind(&f.name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn columns<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = &'a Field>,
{
    fields
        .into_iter()
        .map(|f| quote_identifier(&f.column))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `use` lines for the model's external types
pub fn imports(model: &TableModel) -> String {
    model
        .dependencies
        .iter()
        .map(|d| format!("{}\n", d.use_statement()))
        .collect()
}

/// Struct field declarations, renaming to the column where the names differ
pub fn struct_fields(model: &TableModel) -> String {
    model
        .fields
        .iter()
        .map(|f| {
            let ident = f.name.strip_prefix("r#").unwrap_or(&f.name);
            if ident == f.column {
                format!("{}pub {}: {},", FIELD_INDENT, f.name, f.ty.rust_type())
            } else {
                format!(
                    "{}#[serde(rename = {:?})]\n{}pub {}: {},",
                    FIELD_INDENT,
                    f.column,
                    FIELD_INDENT,
                    f.name,
                    f.ty.rust_type()
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn scan(field: &Field) -> String {
    match field.ty.category.read_type() {
        Some(read) if !field.nullable => format!(
            "{}{}: row.try_get::<{}::{}, _>({:?})?.into(),",
            SCAN_INDENT, field.name, SUPPORT_PATH, read, field.column
        ),
        _ => format!("{}{}: row.try_get({:?})?,", SCAN_INDENT, field.name, field.column),
    }
}

/// Field initializers reading each column from a row
pub fn scan_fields(model: &TableModel) -> String {
    model.fields.iter().map(scan).collect::<Vec<_>>().join("\n")
}

/// Every column, in table order
pub fn select_fields(model: &TableModel) -> String {
    columns(&model.fields)
}

pub fn table_ident(model: &TableModel) -> String {
    quote_identifier(&model.table_name)
}

pub fn pk_ident(model: &TableModel) -> String {
    quote_identifier(&model.primary_key.column)
}

pub fn pk_type(model: &TableModel) -> String {
    model.primary_key.ty.rust_type().to_string()
}

fn inserted(field: &Field) -> bool {
    field.role != FieldRole::Identity
}

fn insert_bound(field: &Field) -> bool {
    matches!(field.role, FieldRole::Ordinary | FieldRole::UpdatedTimestamp)
}

/// Insert column list; the identity is left to the engine
pub fn insert_fields(model: &TableModel) -> String {
    columns(model.fields.iter().filter(|f| inserted(f)))
}

/// Insert value list; `created_at` is filled in by the engine
pub fn insert_values(model: &TableModel) -> String {
    model
        .fields
        .iter()
        .filter(|f| inserted(f))
        .map(|f| match f.role {
            FieldRole::CreatedTimestamp => NOW,
            _ => "?",
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn insert_args(model: &TableModel) -> String {
    binds(model.fields.iter().filter(|f| insert_bound(f)))
}

/// Write the engine-assigned key back, when the identity is a plain integer key
pub fn insert_returning(model: &TableModel) -> String {
    match model.identity() {
        Some(identity)
            if model.has_int_pk()
                && identity.column == model.primary_key.column
                && identity.ty.category == TypeCategory::Integer
                && !identity.nullable =>
        {
            format!(
                "{}self.{} = result.last_insert_id() as i64;",
                BODY_INDENT, identity.name
            )
        }
        _ => String::new(),
    }
}

/// Update assignments; identity and `created_at` are never changed
pub fn update_values(model: &TableModel) -> String {
    model
        .fields
        .iter()
        .filter_map(|f| match f.role {
            FieldRole::Ordinary => Some(format!("{}=?", quote_identifier(&f.column))),
            FieldRole::UpdatedTimestamp => {
                Some(format!("{}={}", quote_identifier(&f.column), UTC_NOW))
            }
            FieldRole::Identity | FieldRole::CreatedTimestamp => None,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Update binds, followed by the key for the `WHERE` clause
pub fn update_args(model: &TableModel) -> String {
    let mut lines: Vec<String> = model
        .fields
        .iter()
        .filter(|f| f.role == FieldRole::Ordinary)
        .map(|f| bind(&f.name))
        .collect();
    lines.push(bind(&model.primary_key.field));
    lines.join("\n")
}

pub fn upsert_fields(model: &TableModel) -> String {
    columns(&model.fields)
}

pub fn upsert_values(model: &TableModel) -> String {
    model
        .fields
        .iter()
        .map(|f| match f.role {
            FieldRole::CreatedTimestamp => NOW,
            _ => "?",
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn upsert_args(model: &TableModel) -> String {
    binds(
        model
            .fields
            .iter()
            .filter(|f| f.role != FieldRole::CreatedTimestamp),
    )
}

/// `ON DUPLICATE KEY UPDATE` assignments
///
/// The identity is rebound through `LAST_INSERT_ID` so the statement reports
/// the existing row's key when it updates instead of inserting.
pub fn upsert_on_duplicate(model: &TableModel) -> String {
    model
        .fields
        .iter()
        .filter_map(|f| {
            let col = quote_identifier(&f.column);
            match f.role {
                FieldRole::Identity => Some(format!("{}=LAST_INSERT_ID({})", col, col)),
                FieldRole::UpdatedTimestamp => Some(format!("{}={}", col, UTC_NOW)),
                FieldRole::CreatedTimestamp => None,
                FieldRole::Ordinary => Some(format!("{}=VALUES({})", col, col)),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn delete_args(model: &TableModel) -> String {
    bind(&model.primary_key.field)
}
