//! Source rendering for generated models

pub mod helpers;
pub mod template;

use crate::error::Result;
use crate::models::assembler::TableModel;
use crate::utils::naming::{is_plain_identifier, to_module_name};

pub use template::{Helper, Template};

/// The per-table template shipped with modelgen
pub const TABLE_TEMPLATE: &str = include_str!("../../templates/table.rs.tmpl");

/// Methods addressing a row by its key, rendered into `{{key_methods}}`
pub const KEY_METHODS_TEMPLATE: &str = include_str!("../../templates/key_methods.rs.tmpl");

/// Name of the generated package's module file
pub const MOD_FILE: &str = "mod.rs";

/// Renders table models into Rust source files
#[derive(Debug, Clone)]
pub struct Renderer {
    template: Template,
    key_methods: Template,
    package: String,
}

impl Renderer {
    /// Create a renderer using the built-in table template
    pub fn new(package: &str) -> Result<Self> {
        Self::with_template(package, TABLE_TEMPLATE)
    }

    /// Create a renderer from custom template text
    pub fn with_template(package: &str, text: &str) -> Result<Self> {
        Ok(Self {
            template: Template::parse("table.rs", text)?,
            key_methods: Template::parse("key_methods.rs", KEY_METHODS_TEMPLATE)?,
            package: package.to_string(),
        })
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Render one table's source file
    pub fn render(&self, model: &TableModel) -> String {
        self.template.render(|helper| self.resolve(helper, model))
    }

    fn resolve(&self, helper: Helper, model: &TableModel) -> String {
        match helper {
            Helper::PackageName => self.package.clone(),
            Helper::TableName => model.table_name.clone(),
            Helper::TableIdent => helpers::table_ident(model),
            Helper::StructName => model.name.clone(),
            Helper::Imports => helpers::imports(model),
            Helper::StructFields => helpers::struct_fields(model),
            Helper::ScanFields => helpers::scan_fields(model),
            Helper::SelectFields => helpers::select_fields(model),
            Helper::PkIdent => helpers::pk_ident(model),
            Helper::PkField => model.primary_key.field.clone(),
            Helper::PkType => helpers::pk_type(model),
            Helper::InsertFields => helpers::insert_fields(model),
            Helper::InsertValues => helpers::insert_values(model),
            Helper::InsertArgs => helpers::insert_args(model),
            Helper::InsertReturning => helpers::insert_returning(model),
            Helper::UpdateValues => helpers::update_values(model),
            Helper::UpdateArgs => helpers::update_args(model),
            Helper::UpsertFields => helpers::upsert_fields(model),
            Helper::UpsertValues => helpers::upsert_values(model),
            Helper::UpsertArgs => helpers::upsert_args(model),
            Helper::UpsertOnDuplicate => helpers::upsert_on_duplicate(model),
            Helper::DeleteArgs => helpers::delete_args(model),
            Helper::KeyMethods => self.render_key_methods(model),
        }
    }

    fn render_key_methods(&self, model: &TableModel) -> String {
        if !model.has_key_field() {
            tracing::warn!(
                table = model.table_name.as_str(),
                "No primary key and no `id` column, skipping find_by_pk, update and delete"
            );
            return String::new();
        }

        self.key_methods.render(|helper| match helper {
            Helper::KeyMethods => String::new(),
            other => self.resolve(other, model),
        })
    }

    /// Render the package's `mod.rs`, declaring the support module and every table
    pub fn render_mod_file(&self, models: &[TableModel]) -> String {
        let mut sorted: Vec<&TableModel> = models.iter().collect();
        sorted.sort_by(|a, b| a.table_name.cmp(&b.table_name));

        let mut out = format!(
            "// Code generated by modelgen. DO NOT EDIT.\n// Package: {}\n\npub mod x_helpers;\n#[cfg(test)]\nmod x_helpers_test;\n",
            self.package
        );

        if !sorted.is_empty() {
            out.push('\n');
        }
        for model in &sorted {
            let module = to_module_name(&model.table_name);
            if !is_plain_identifier(&model.table_name) {
                out.push_str(&format!("#[path = {:?}]\n", file_name(&model.table_name)));
            }
            out.push_str(&format!("pub mod {};\n", module));
        }

        if !sorted.is_empty() {
            out.push('\n');
        }
        for model in &sorted {
            out.push_str(&format!(
                "pub use {}::{};\n",
                to_module_name(&model.table_name),
                model.name
            ));
        }

        out
    }
}

/// File a table's module is written to, named after the raw table name
pub fn file_name(table_name: &str) -> String {
    format!("{}.rs", table_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assembler::assemble;
    use crate::schema::types::{ColumnDescriptor, TableDescription};
    use pretty_assertions::assert_eq;

    fn model(name: &str) -> TableModel {
        let mut table = TableDescription::new(name);
        table.add_column(ColumnDescriptor::new("id", "bigint(20)").primary());
        table.add_column(ColumnDescriptor::new("total", "decimal(10,2)").nullable(true));
        table.add_column(ColumnDescriptor::new("created_at", "timestamp"));
        assemble(&table).unwrap()
    }

    #[test]
    fn test_builtin_template_parses() {
        let renderer = Renderer::new("models").unwrap();
        assert_eq!(renderer.package(), "models");
    }

    #[test]
    fn test_render_table() {
        let renderer = Renderer::new("models").unwrap();
        let source = renderer.render(&model("orders"));

        assert!(!source.contains("{{"));
        assert!(source.contains("pub struct Orders {"));
        assert!(source.contains("    pub total: NullFloat64,"));
        assert!(source.contains("use chrono::NaiveDateTime;"));
        assert!(source.contains("created_at: row.try_get::<super::x_helpers::DbTime, _>(\"created_at\")?.into(),"));
        assert!(source.contains(r##"pub const TABLE: &'static str = r#"orders"#;"##));
        assert!(source.contains(
            "INSERT INTO `orders` (`total`, `created_at`) VALUES (?, NOW())"
        ));
        assert!(source.contains("self.id = result.last_insert_id() as i64;"));
        assert!(source.contains("pub async fn find_by_pk<'e, E>(executor: E, pk: i64)"));
        assert!(source.contains("DELETE FROM `orders` WHERE `id` = ?"));
    }

    #[test]
    fn test_keyless_table_without_id_skips_key_methods() {
        let mut table = TableDescription::new("audit");
        table.add_column(ColumnDescriptor::new("message", "text"));
        table.add_column(ColumnDescriptor::new("at", "datetime"));
        let keyless = assemble(&table).unwrap();

        let renderer = Renderer::new("models").unwrap();
        let source = renderer.render(&keyless);

        assert!(!source.contains("{{"));
        assert!(!source.contains("find_by_pk"));
        assert!(!source.contains("pub async fn update"));
        assert!(!source.contains("pub async fn delete"));
        assert!(!source.contains("self.id"));
        assert!(source.contains("INSERT INTO `audit` (`message`, `at`) VALUES (?, ?)"));
        assert!(source.contains("pub async fn upsert<'e, E>"));

        let mut table = TableDescription::new("events");
        table.add_column(ColumnDescriptor::new("id", "bigint(20)"));
        table.add_column(ColumnDescriptor::new("name", "varchar(64)"));
        let source = renderer.render(&assemble(&table).unwrap());
        assert!(source.contains("pub async fn find_by_pk<'e, E>(executor: E, pk: i64)"));
        assert!(source.contains("DELETE FROM `events` WHERE `id` = ?"));
    }

    #[test]
    fn test_custom_template() {
        let renderer = Renderer::with_template("app", "{{package_name}}::{{struct_name}}").unwrap();
        assert_eq!(renderer.render(&model("line_items")), "app::LineItems");

        assert!(Renderer::with_template("app", "{{bogus}}").is_err());
    }

    #[test]
    fn test_mod_file() {
        let renderer = Renderer::new("models").unwrap();
        let out = renderer.render_mod_file(&[model("orders"), model("Audit Log"), model("customers")]);

        let expected = "// Code generated by modelgen. DO NOT EDIT.\n\
// Package: models\n\
\n\
pub mod x_helpers;\n\
#[cfg(test)]\n\
mod x_helpers_test;\n\
\n\
#[path = \"Audit Log.rs\"]\n\
pub mod audit_log;\n\
pub mod customers;\n\
pub mod orders;\n\
\n\
pub use audit_log::AuditLog;\n\
pub use customers::Customers;\n\
pub use orders::Orders;\n";
        assert_eq!(out, expected);
    }
}
