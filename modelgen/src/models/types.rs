//! Column type mapping
//!
//! Maps a MySQL column type spelling onto the Rust type used in generated
//! models. Every nullable column gets a wrapper type from the support module
//! rather than `Option<T>`, so a NULL and a zero value stay distinguishable
//! when the model goes through JSON.

use std::fmt;

use crate::error::{Error, Result};

/// Semantic category of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeCategory {
    Integer,
    Float,
    Text,
    Boolean,
    Timestamp,
    Bytes,
    Json,
}

impl TypeCategory {
    /// Rust type used for a non-null column
    pub fn rust_type(self) -> &'static str {
        match self {
            TypeCategory::Integer => "i64",
            TypeCategory::Float => "f64",
            TypeCategory::Text => "String",
            TypeCategory::Boolean => "bool",
            TypeCategory::Timestamp => "NaiveDateTime",
            TypeCategory::Bytes => "Vec<u8>",
            TypeCategory::Json => "JsonValue",
        }
    }

    /// Support type a non-null column is decoded through, when the plain type
    /// accepts too few engine types
    pub fn read_type(self) -> Option<&'static str> {
        match self {
            TypeCategory::Integer => Some("DbInt"),
            TypeCategory::Float => Some("DbFloat"),
            TypeCategory::Timestamp => Some("DbTime"),
            TypeCategory::Text | TypeCategory::Boolean | TypeCategory::Bytes | TypeCategory::Json => {
                None
            }
        }
    }

    /// Wrapper type used for a nullable column
    pub fn nullable_type(self) -> &'static str {
        match self {
            TypeCategory::Integer => "NullInt64",
            TypeCategory::Float => "NullFloat64",
            TypeCategory::Text => "NullString",
            TypeCategory::Boolean => "NullBool",
            TypeCategory::Timestamp => "NullTime",
            TypeCategory::Bytes => "NullBytes",
            TypeCategory::Json => "NullJson",
        }
    }
}

/// An import the generated module must declare to use a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dependency {
    Chrono,
    SerdeJson,
}

impl Dependency {
    /// The `use` line for this dependency
    pub fn use_statement(self) -> &'static str {
        match self {
            Dependency::Chrono => "use chrono::NaiveDateTime;",
            Dependency::SerdeJson => "use serde_json::Value as JsonValue;",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Chrono => write!(f, "chrono"),
            Dependency::SerdeJson => write!(f, "serde_json"),
        }
    }
}

/// Report the extra dependency a category needs, if any
pub fn dependencies_for(category: TypeCategory) -> Option<Dependency> {
    match category {
        TypeCategory::Timestamp => Some(Dependency::Chrono),
        TypeCategory::Json => Some(Dependency::SerdeJson),
        _ => None,
    }
}

/// The target type chosen for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappedType {
    pub category: TypeCategory,
    pub nullable: bool,
}

impl MappedType {
    pub fn new(category: TypeCategory, nullable: bool) -> Self {
        Self { category, nullable }
    }

    /// Rust type name as written in generated code
    pub fn rust_type(&self) -> &'static str {
        if self.nullable {
            self.category.nullable_type()
        } else {
            self.category.rust_type()
        }
    }

    pub fn dependency(&self) -> Option<Dependency> {
        dependencies_for(self.category)
    }
}

impl fmt::Display for MappedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_type())
    }
}

/// How a rule matches a normalized type
#[derive(Debug, Clone, Copy)]
enum TypePattern {
    /// Base name equals the given spelling
    Exact(&'static str),
    /// Base name equals the spelling and the display width matches
    Width(&'static str, &'static str),
    /// Base name starts with the given spelling
    Prefix(&'static str),
}

struct TypeRule {
    pattern: TypePattern,
    category: TypeCategory,
}

const fn rule(pattern: TypePattern, category: TypeCategory) -> TypeRule {
    TypeRule { pattern, category }
}

use TypeCategory::*;
use TypePattern::*;

/// Ordered rules, first match wins
const RULES: &[TypeRule] = &[
    rule(Exact("bool"), Boolean),
    rule(Exact("boolean"), Boolean),
    rule(Width("tinyint", "1"), Boolean),
    rule(Width("bit", "1"), Boolean),
    rule(Prefix("tinyint"), Integer),
    rule(Prefix("smallint"), Integer),
    rule(Prefix("mediumint"), Integer),
    rule(Prefix("bigint"), Integer),
    rule(Prefix("int"), Integer),
    rule(Exact("bit"), Integer),
    rule(Exact("year"), Integer),
    rule(Prefix("dec"), Float),
    rule(Prefix("numeric"), Float),
    rule(Prefix("fixed"), Float),
    rule(Prefix("float"), Float),
    rule(Prefix("double"), Float),
    rule(Prefix("real"), Float),
    rule(Prefix("char"), Text),
    rule(Prefix("varchar"), Text),
    rule(Prefix("tinytext"), Text),
    rule(Prefix("mediumtext"), Text),
    rule(Prefix("longtext"), Text),
    rule(Prefix("text"), Text),
    rule(Exact("enum"), Text),
    rule(Exact("set"), Text),
    rule(Prefix("datetime"), Timestamp),
    rule(Prefix("date"), Timestamp),
    rule(Prefix("timestamp"), Timestamp),
    rule(Prefix("time"), Timestamp),
    rule(Prefix("binary"), Bytes),
    rule(Prefix("varbinary"), Bytes),
    rule(Prefix("tinyblob"), Bytes),
    rule(Prefix("mediumblob"), Bytes),
    rule(Prefix("longblob"), Bytes),
    rule(Prefix("blob"), Bytes),
    rule(Exact("json"), Json),
];

/// Split a raw spelling such as `INT(10) UNSIGNED` into `("int", Some("10"))`
fn normalize(raw_type: &str) -> (String, Option<String>) {
    let lowered = raw_type.trim().to_lowercase();

    let (base, width) = match lowered.find('(') {
        Some(open) => {
            let close = lowered[open..].find(')').map(|i| open + i);
            let width = close.map(|close| lowered[open + 1..close].trim().to_string());
            (lowered[..open].to_string(), width)
        }
        None => (lowered.clone(), None),
    };

    let base = base
        .split_whitespace()
        .filter(|word| !matches!(*word, "unsigned" | "signed" | "zerofill"))
        .collect::<Vec<_>>()
        .join(" ");

    (base, width)
}

/// Map a raw engine type and nullability onto a target type
pub fn map_type(raw_type: &str, nullable: bool) -> Result<MappedType> {
    let (base, width) = normalize(raw_type);
    if base.is_empty() {
        return Err(Error::UnrecognizedType(raw_type.to_string()));
    }

    let matched = RULES.iter().find(|rule| match rule.pattern {
        Exact(name) => base == name,
        Width(name, expected) => base == name && width.as_deref() == Some(expected),
        Prefix(name) => base.starts_with(name),
    });

    match matched {
        Some(rule) => Ok(MappedType::new(rule.category, nullable)),
        None => Err(Error::UnrecognizedType(raw_type.to_string())),
    }
}
