//! Naming utilities for modelgen
//!
//! This module turns engine identifiers into Rust identifiers and back into
//! quoted SQL identifiers.

use inflector::Inflector;

/// Apply a naming convention to a string
pub fn apply_naming_convention(name: &str, convention: &str) -> String {
    match convention {
        "snake_case" => name.to_snake_case(),
        "pascal_case" => name.to_pascal_case(),
        _ => name.to_string(), // Default: keep as is
    }
}

/// Rust type name for a table
pub fn to_type_name(table_name: &str) -> String {
    sanitize_identifier(&apply_naming_convention(table_name, "pascal_case"))
}

/// Rust field name for a column
pub fn to_field_name(column_name: &str) -> String {
    escape_rust_keyword(&sanitize_identifier(&apply_naming_convention(
        column_name,
        "snake_case",
    )))
}

/// Rust module name for a table
pub fn to_module_name(table_name: &str) -> String {
    to_field_name(table_name)
}

/// Whether a raw name can be used verbatim as a module name
pub fn is_plain_identifier(name: &str) -> bool {
    to_module_name(name) == name
}

/// Sanitize identifiers for Rust
pub fn sanitize_identifier(name: &str) -> String {
    // Remove or replace characters not allowed in identifiers
    let mut sanitized = name.replace(|c: char| !c.is_alphanumeric() && c != '_', "_");

    // Ensure identifier doesn't start with a number
    if sanitized.is_empty() || sanitized.chars().next().map_or(false, |c| c.is_numeric()) {
        sanitized = format!("_{}", sanitized);
    }

    sanitized
}

/// Check if a name is a reserved Rust keyword
pub fn is_rust_keyword(name: &str) -> bool {
    const RUST_KEYWORDS: &[&str] = &[
        "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
        "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen",
        "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override",
        "priv", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where",
        "while", "yield",
    ];

    RUST_KEYWORDS.contains(&name)
}

/// Escape a Rust keyword if needed
pub fn escape_rust_keyword(name: &str) -> String {
    match name {
        // These cannot be raw identifiers
        "self" | "Self" | "super" | "crate" => format!("{}_", name),
        _ if is_rust_keyword(name) => format!("r#{}", name),
        _ => name.to_string(),
    }
}

/// Generate a unique name with a suffix if name exists in the list
pub fn generate_unique_name(name: &str, existing_names: &[String]) -> String {
    if !existing_names.iter().any(|existing| existing == name) {
        return name.to_string();
    }

    // A suffixed keyword is no longer a keyword
    let base = name.strip_prefix("r#").unwrap_or(name);
    let mut counter = 1;
    loop {
        let new_name = format!("{}_{}", base, counter);
        if !existing_names.contains(&new_name) {
            return new_name;
        }
        counter += 1;
    }
}

/// Quote a MySQL identifier with backticks
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_apply_naming_convention() {
        assert_eq!(apply_naming_convention("UserProfile", "snake_case"), "user_profile");
        assert_eq!(apply_naming_convention("user_profile", "pascal_case"), "UserProfile");
        assert_eq!(apply_naming_convention("as_is", "unknown"), "as_is");
        assert_eq!(apply_naming_convention("user_profile", "camel_case"), "user_profile");
    }

    #[rstest]
    #[case("users", "Users")]
    #[case("order_items", "OrderItems")]
    #[case("user-profile", "UserProfile")]
    fn test_type_name(#[case] table: &str, #[case] expected: &str) {
        assert_eq!(to_type_name(table), expected);
    }

    #[rstest]
    #[case("id", "id")]
    #[case("created_at", "created_at")]
    #[case("UserName", "user_name")]
    #[case("type", "r#type")]
    #[case("self", "self_")]
    #[case("user-name", "user_name")]
    fn test_field_name(#[case] column: &str, #[case] expected: &str) {
        assert_eq!(to_field_name(column), expected);
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("user-name"), "user_name");
        assert_eq!(sanitize_identifier("123user"), "_123user");
        assert_eq!(sanitize_identifier("user.name"), "user_name");
        assert_eq!(sanitize_identifier(""), "_");
    }

    #[test]
    fn test_plain_identifier() {
        assert!(is_plain_identifier("orders"));
        assert!(!is_plain_identifier("Orders"));
        assert!(!is_plain_identifier("match"));
    }

    #[test]
    fn test_generate_unique_name() {
        let existing = vec![
            "user".to_string(),
            "user_1".to_string(),
            "r#type".to_string(),
        ];

        assert_eq!(generate_unique_name("profile", &existing), "profile");
        assert_eq!(generate_unique_name("user", &existing), "user_2");
        assert_eq!(generate_unique_name("r#type", &existing), "type_1");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("name"), "`name`");
        assert_eq!(quote_identifier("we`ird"), "`we``ird`");
    }
}
