//! Sortcheck Common Library
//!
//! Shared types, error taxonomy, and naming conventions for the sortcheck
//! fixture pipeline.

pub mod definitions;
pub mod error;

pub use definitions::{SuiteDefinition, TestDefinitions};
pub use error::{Error, Result};

/// Sortcheck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the suite definitions input
pub const DEFINITIONS_FILE: &str = "test-definitions.json";

/// File name of the fixture template input
pub const TEMPLATE_FILE: &str = "template.html";

/// Deterministic fixture file name for a suite.
///
/// Both the generator (when writing) and the verifier (when matching
/// discovered files back to suites) rely on this mapping being stable.
pub fn fixture_file_name(suite: &str) -> String {
    format!("test-{suite}.html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_names_are_stable() {
        assert_eq!(fixture_file_name("basic"), "test-basic.html");
        assert_eq!(fixture_file_name("basic"), fixture_file_name("basic"));
    }
}
