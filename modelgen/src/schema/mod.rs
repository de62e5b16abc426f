//! Schema module for modelgen
//!
//! This module turns introspected rows into normalized table descriptions.

pub mod analyzer;
pub mod directive;
pub mod types;

// Re-export key types
pub use analyzer::SchemaAnalyzer;
pub use directive::OrderDirective;
pub use types::{ColumnDescriptor, KeyRole, TableDescription};
