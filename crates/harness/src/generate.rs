//! Fixture generation from suite definitions and an HTML template

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use sortcheck_common::{
    fixture_file_name, Error, Result, SuiteDefinition, TestDefinitions, DEFINITIONS_FILE,
    TEMPLATE_FILE,
};

/// Configuration for the fixture generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory receiving the generated fixtures
    pub fixtures_dir: PathBuf,

    /// Suite definitions input
    pub definitions_path: PathBuf,

    /// Fixture template input
    pub template_path: PathBuf,
}

impl GeneratorConfig {
    /// Inputs and outputs all live in one directory, as the fixture layout
    /// expects.
    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            definitions_path: dir.join(DEFINITIONS_FILE),
            template_path: dir.join(TEMPLATE_FILE),
            fixtures_dir: dir,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::for_dir("fixtures")
    }
}

/// Template context for one row. The template iterates `row` to emit cells.
#[derive(Debug, Serialize)]
struct RowContext<'a> {
    row: &'a [String],
}

/// Template context for one suite.
#[derive(Debug, Serialize)]
struct FixtureContext<'a> {
    columns: Vec<usize>,
    rows: Vec<RowContext<'a>>,
    suite: &'a str,
    json_sortresults: String,
}

/// Render one suite's fixture. Deterministic: identical template and suite
/// content produce identical HTML.
pub fn render_fixture(template: &str, suite: &str, def: &SuiteDefinition) -> Result<String> {
    let context = FixtureContext {
        columns: (0..def.column_count()).collect(),
        rows: def.rows.iter().map(|row| RowContext { row }).collect(),
        suite,
        json_sortresults: def.sort_results_json()?,
    };

    let registry = Handlebars::new();
    Ok(registry.render_template(template, &context)?)
}

/// Renders one `test-<suite>.html` per suite, sequentially, halting on the
/// first read, render, or write failure.
pub struct FixtureGenerator {
    config: GeneratorConfig,
}

impl FixtureGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate every suite's fixture, in definitions-file order.
    ///
    /// Suite shape is trusted here; shape violations surface later as
    /// failing setup checks during verification.
    pub fn generate_all(&self) -> Result<Vec<PathBuf>> {
        debug!("Reading JSON description of tests");
        let definitions = TestDefinitions::from_file(&self.config.definitions_path)?;
        let template = self.read_template()?;

        // Surface template syntax errors before the first fixture is written.
        let mut registry = Handlebars::new();
        registry.register_template_string("fixture", &template)?;

        std::fs::create_dir_all(&self.config.fixtures_dir)?;

        let mut written = Vec::with_capacity(definitions.len());
        for (suite, def) in definitions.iter() {
            info!("Processing suite {}", suite);
            let html = render_fixture(&template, suite, def)?;

            let path = self.config.fixtures_dir.join(fixture_file_name(suite));
            std::fs::write(&path, &html)?;
            debug!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    fn read_template(&self) -> Result<String> {
        let path: &Path = &self.config.template_path;
        if !path.is_file() {
            return Err(Error::TemplateNotFound {
                path: path.display().to_string(),
            });
        }
        Ok(std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "<html><head>\
        <script>var SORTRESULTS = {{{json_sortresults}}};</script></head>\
        <body><table class=\"sortable\">\
        <tr>{{#each columns}}<th>c{{this}}</th>{{/each}}</tr>\
        {{#each rows}}<tr>{{#each row}}<td>{{{this}}}</td>{{/each}}</tr>{{/each}}\
        </table></body></html>";

    const DEFINITIONS: &str = r#"{
        "basic": {
            "rows": [["b", "2"], ["a", "1"]],
            "expected_column_1_after_sort_by_column_n": [["a", "b"], ["a", "b"]]
        },
        "second": {
            "rows": [["x"]],
            "expected_column_1_after_sort_by_column_n": [["x"]]
        }
    }"#;

    fn write_inputs(dir: &Path) {
        std::fs::write(dir.join(DEFINITIONS_FILE), DEFINITIONS).unwrap();
        std::fs::write(dir.join(TEMPLATE_FILE), TEMPLATE).unwrap();
    }

    #[test]
    fn renders_rows_in_document_order() {
        let defs = TestDefinitions::from_json(DEFINITIONS).unwrap();
        let html = render_fixture(TEMPLATE, "basic", defs.get("basic").unwrap()).unwrap();

        assert!(html.contains("<tr><th>c0</th><th>c1</th></tr>"));
        let b_row = html.find("<td>b</td><td>2</td>").unwrap();
        let a_row = html.find("<td>a</td><td>1</td>").unwrap();
        assert!(b_row < a_row, "rows must keep definition order before sorting");
    }

    #[test]
    fn embeds_sort_results_unescaped() {
        let defs = TestDefinitions::from_json(DEFINITIONS).unwrap();
        let html = render_fixture(TEMPLATE, "basic", defs.get("basic").unwrap()).unwrap();
        assert!(html.contains(r#"var SORTRESULTS = [["a","b"],["a","b"]];"#));
    }

    #[test]
    fn rendering_is_deterministic() {
        let defs = TestDefinitions::from_json(DEFINITIONS).unwrap();
        let def = defs.get("basic").unwrap();
        assert_eq!(
            render_fixture(TEMPLATE, "basic", def).unwrap(),
            render_fixture(TEMPLATE, "basic", def).unwrap()
        );
    }

    #[test]
    fn generates_one_fixture_per_suite() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());

        let generator = FixtureGenerator::new(GeneratorConfig::for_dir(dir.path()));
        let written = generator.generate_all().unwrap();

        assert_eq!(written.len(), 2);
        assert!(dir.path().join("test-basic.html").is_file());
        assert!(dir.path().join("test-second.html").is_file());
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());

        let generator = FixtureGenerator::new(GeneratorConfig::for_dir(dir.path()));
        generator.generate_all().unwrap();
        let first = std::fs::read(dir.path().join("test-basic.html")).unwrap();
        generator.generate_all().unwrap();
        let second = std::fs::read(dir.path().join("test-basic.html")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_definitions_abort_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TEMPLATE_FILE), TEMPLATE).unwrap();

        let generator = FixtureGenerator::new(GeneratorConfig::for_dir(dir.path()));
        let err = generator.generate_all().unwrap_err();

        assert!(matches!(err, Error::DefinitionsNotFound { .. }));
        let fixtures: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".html"))
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("test-"))
            .collect();
        assert!(fixtures.is_empty(), "no partial output on fatal input failure");
    }

    #[test]
    fn malformed_definitions_abort_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFINITIONS_FILE), "{broken").unwrap();
        std::fs::write(dir.path().join(TEMPLATE_FILE), TEMPLATE).unwrap();

        let generator = FixtureGenerator::new(GeneratorConfig::for_dir(dir.path()));
        let err = generator.generate_all().unwrap_err();

        assert!(matches!(err, Error::Json(_)));
        assert!(!dir.path().join("test-basic.html").exists());
    }

    #[test]
    fn template_syntax_errors_abort_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFINITIONS_FILE), DEFINITIONS).unwrap();
        std::fs::write(dir.path().join(TEMPLATE_FILE), "{{#each rows}}<tr>").unwrap();

        let generator = FixtureGenerator::new(GeneratorConfig::for_dir(dir.path()));
        let err = generator.generate_all().unwrap_err();

        assert!(matches!(err, Error::Template(_)));
        assert!(!dir.path().join("test-basic.html").exists());
    }

    #[test]
    fn missing_template_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFINITIONS_FILE), DEFINITIONS).unwrap();

        let generator = FixtureGenerator::new(GeneratorConfig::for_dir(dir.path()));
        match generator.generate_all().unwrap_err() {
            Error::TemplateNotFound { path } => assert!(path.contains(TEMPLATE_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
