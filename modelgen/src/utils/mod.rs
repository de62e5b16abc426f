//! Utilities for modelgen

pub mod logging;
pub mod naming;

// Re-export key utility functions
pub use logging::init_logging;
pub use naming::{quote_identifier, to_field_name, to_module_name, to_type_name};
