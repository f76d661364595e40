//! Suite definitions loaded from `test-definitions.json`
//!
//! The definitions file is a JSON object keyed by suite name. Object order is
//! the processing order, so suites deserialize into an insertion-ordered map.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single named test suite: document-order rows plus the expected
/// first-column values after sorting by each column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteDefinition {
    /// Row-content tuples in document order before any sort. Cell values are
    /// opaque strings (they may carry HTML markup).
    pub rows: Vec<Vec<String>>,

    /// Outer index = column number (0-based). Each inner sequence lists the
    /// expected first-column values, one per data row, after sorting by that
    /// column.
    pub expected_column_1_after_sort_by_column_n: Vec<Vec<String>>,
}

impl SuiteDefinition {
    /// Column count as declared by the expected results. The generator never
    /// inspects `rows` to infer this.
    pub fn column_count(&self) -> usize {
        self.expected_column_1_after_sort_by_column_n.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Expected results serialized for embedding as an in-page value.
    pub fn sort_results_json(&self) -> Result<String> {
        Ok(serde_json::to_string(
            &self.expected_column_1_after_sort_by_column_n,
        )?)
    }
}

/// The full definitions file: suite name -> suite, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestDefinitions {
    suites: IndexMap<String, SuiteDefinition>,
}

impl TestDefinitions {
    /// Parse definitions from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse the definitions file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::DefinitionsNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    pub fn get(&self, suite: &str) -> Option<&SuiteDefinition> {
        self.suites.get(suite)
    }

    /// Suites in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SuiteDefinition)> {
        self.suites.iter().map(|(name, def)| (name.as_str(), def))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = r#"{
        "basic": {
            "rows": [["b", "2"], ["a", "1"]],
            "expected_column_1_after_sort_by_column_n": [["a", "b"], ["a", "b"]]
        }
    }"#;

    #[test]
    fn parses_a_single_suite() {
        let defs = TestDefinitions::from_json(BASIC).unwrap();
        assert_eq!(defs.len(), 1);

        let suite = defs.get("basic").unwrap();
        assert_eq!(suite.row_count(), 2);
        assert_eq!(suite.column_count(), 2);
        assert_eq!(suite.rows[0], vec!["b", "2"]);
    }

    #[test]
    fn suite_order_follows_file_order() {
        let json = r#"{
            "zebra": {"rows": [], "expected_column_1_after_sort_by_column_n": []},
            "alpha": {"rows": [], "expected_column_1_after_sort_by_column_n": []},
            "middle": {"rows": [], "expected_column_1_after_sort_by_column_n": []}
        }"#;
        let defs = TestDefinitions::from_json(json).unwrap();
        let names: Vec<&str> = defs.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zebra", "alpha", "middle"]);
    }

    #[test]
    fn sort_results_serialize_to_nested_arrays() {
        let defs = TestDefinitions::from_json(BASIC).unwrap();
        let json = defs.get("basic").unwrap().sort_results_json().unwrap();
        assert_eq!(json, r#"[["a","b"],["a","b"]]"#);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = TestDefinitions::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let err = TestDefinitions::from_file(Path::new("/nonexistent/defs.json")).unwrap_err();
        match err {
            Error::DefinitionsNotFound { path } => assert!(path.contains("defs.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
