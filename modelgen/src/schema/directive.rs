//! Migration ordering directives
//!
//! A table can ask to be created before or after others by putting
//! `modelgen:<n>` in its primary-key column comment. Lower numbers are
//! created first.

use std::fmt;

/// Prefix recognised at the start of a column comment
pub const DIRECTIVE_PREFIX: &str = "modelgen";

/// Outcome of reading an ordering directive from a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderDirective {
    /// The comment carries no directive
    Absent,
    /// A well-formed `modelgen:<n>` directive
    Order(i64),
    /// The prefix is present but the rest does not parse
    Malformed(String),
}

impl OrderDirective {
    /// Parse a free-text column comment
    pub fn parse(comment: &str) -> Self {
        let Some(rest) = comment.trim().strip_prefix(DIRECTIVE_PREFIX) else {
            return OrderDirective::Absent;
        };

        let Some(value) = rest.trim_start().strip_prefix(':') else {
            return OrderDirective::Malformed(rest.to_string());
        };

        match value.trim().parse::<i64>() {
            Ok(order) => OrderDirective::Order(order),
            Err(_) => OrderDirective::Malformed(value.to_string()),
        }
    }

    /// The ordering key; anything but a valid directive sorts at 0
    pub fn order(&self) -> i64 {
        match self {
            OrderDirective::Order(order) => *order,
            _ => 0,
        }
    }

    /// Resolve the directive for a table, logging when it cannot be used
    pub fn resolve(table: &str, comment: Option<&str>) -> i64 {
        let directive = comment.map(Self::parse).unwrap_or(OrderDirective::Absent);

        match &directive {
            OrderDirective::Absent => {
                tracing::debug!(table = table, "No ordering directive, using order 0");
            }
            OrderDirective::Malformed(raw) => {
                tracing::warn!(
                    table = table,
                    directive = raw.as_str(),
                    "Could not parse ordering directive, make sure to only use numbers in order comments; using order 0"
                );
            }
            OrderDirective::Order(order) => {
                tracing::debug!(table = table, order = order, "Ordering directive found");
            }
        }

        directive.order()
    }
}

impl fmt::Display for OrderDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirective::Absent => write!(f, "<none>"),
            OrderDirective::Order(order) => write!(f, "{}:{}", DIRECTIVE_PREFIX, order),
            OrderDirective::Malformed(raw) => write!(f, "{}{} (malformed)", DIRECTIVE_PREFIX, raw),
        }
    }
}
