//! Placeholder templates
//!
//! A template is plain text with `{{helper}}` placeholders. Every placeholder
//! is resolved against [`Helper`] when the template is parsed, so a template
//! that parses can always be rendered.

use std::str::FromStr;

use crate::error::{Error, Result};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// The fixed set of values a template may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Helper {
    PackageName,
    TableName,
    TableIdent,
    StructName,
    Imports,
    StructFields,
    ScanFields,
    SelectFields,
    PkIdent,
    PkField,
    PkType,
    InsertFields,
    InsertValues,
    InsertArgs,
    InsertReturning,
    UpdateValues,
    UpdateArgs,
    UpsertFields,
    UpsertValues,
    UpsertArgs,
    UpsertOnDuplicate,
    DeleteArgs,
    KeyMethods,
}

impl FromStr for Helper {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        let helper = match name {
            "package_name" => Helper::PackageName,
            "table_name" => Helper::TableName,
            "table_ident" => Helper::TableIdent,
            "struct_name" => Helper::StructName,
            "imports" => Helper::Imports,
            "struct_fields" => Helper::StructFields,
            "scan_fields" => Helper::ScanFields,
            "select_fields" => Helper::SelectFields,
            "pk_ident" => Helper::PkIdent,
            "pk_field" => Helper::PkField,
            "pk_type" => Helper::PkType,
            "insert_fields" => Helper::InsertFields,
            "insert_values" => Helper::InsertValues,
            "insert_args" => Helper::InsertArgs,
            "insert_returning" => Helper::InsertReturning,
            "update_values" => Helper::UpdateValues,
            "update_args" => Helper::UpdateArgs,
            "upsert_fields" => Helper::UpsertFields,
            "upsert_values" => Helper::UpsertValues,
            "upsert_args" => Helper::UpsertArgs,
            "upsert_on_duplicate" => Helper::UpsertOnDuplicate,
            "delete_args" => Helper::DeleteArgs,
            "key_methods" => Helper::KeyMethods,
            _ => {
                return Err(Error::TemplateError(format!("unknown helper `{}`", name)));
            }
        };

        Ok(helper)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Placeholder(Helper),
}

/// A parsed template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text, rejecting unknown helpers and unclosed placeholders
    pub fn parse(name: &str, text: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = text;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }

            let after_open = &rest[start + OPEN.len()..];
            let end = after_open.find(CLOSE).ok_or_else(|| {
                Error::TemplateError(format!(
                    "{}: unclosed placeholder at byte {}",
                    name,
                    offset + start
                ))
            })?;

            let helper_name = after_open[..end].trim();
            let helper = helper_name
                .parse::<Helper>()
                .map_err(|e| Error::TemplateError(format!("{}: {}", name, e)))?;
            segments.push(Segment::Placeholder(helper));

            let consumed = start + OPEN.len() + end + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            segments,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Helpers used by the template, in order of appearance
    pub fn helpers(&self) -> impl Iterator<Item = Helper> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(helper) => Some(*helper),
            Segment::Text(_) => None,
        })
    }

    /// Render with a function supplying each helper's text
    pub fn render<F>(&self, mut resolve: F) -> String
    where
        F: FnMut(Helper) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(helper) => out.push_str(&resolve(*helper)),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_render() {
        let template = Template::parse("t", "struct {{ struct_name }} in {{package_name}};").unwrap();
        let helpers: Vec<Helper> = template.helpers().collect();
        assert_eq!(helpers, vec![Helper::StructName, Helper::PackageName]);

        let out = template.render(|helper| match helper {
            Helper::StructName => "Orders".to_string(),
            Helper::PackageName => "models".to_string(),
            _ => String::new(),
        });
        assert_eq!(out, "struct Orders in models;");
    }

    #[test]
    fn test_single_braces_are_text() {
        let template = Template::parse("t", "impl X { fn f() {} }").unwrap();
        assert_eq!(template.helpers().count(), 0);
        assert_eq!(template.render(|_| unreachable!()), "impl X { fn f() {} }");
    }

    #[test]
    fn test_unknown_helper_is_rejected() {
        let err = Template::parse("table", "{{struct_name}} {{nope}}").unwrap_err();
        assert!(matches!(err, Error::TemplateError(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_unclosed_placeholder_is_rejected() {
        let err = Template::parse("table", "abc {{struct_name").unwrap_err();
        assert!(err.to_string().contains("byte 4"));
    }
}
