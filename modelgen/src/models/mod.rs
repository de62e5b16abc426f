//! Models module for modelgen
//!
//! Type mapping and the render-ready table models built from it.

pub mod assembler;
pub mod types;

// Re-export key types
pub use assembler::{assemble, Field, FieldRole, PrimaryKey, TableModel};
pub use types::{dependencies_for, map_type, Dependency, MappedType, TypeCategory};
