//! Support files copied verbatim into every generated package
//!
//! The sources below are compiled and tested here, then written out next to
//! the generated table modules.

pub mod x_helpers;


/// Source of the nullable wrapper module
pub const HELPERS_SOURCE: &str = include_str!("x_helpers.rs");

/// Source of the wrapper module's tests
pub const HELPERS_TEST_SOURCE: &str = include_str!("x_helpers_test.rs");

/// File name of the wrapper module in the output directory
pub const HELPERS_FILE: &str = "x_helpers.rs";

/// File name of the wrapper tests in the output directory
pub const HELPERS_TEST_FILE: &str = "x_helpers_test.rs";
