//! Sequential fixture verification and run reporting

use std::path::{Path, PathBuf};
use std::time::Instant;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use walkdir::WalkDir;

use sortcheck_common::{Error, Result};

use crate::browser::{AssertionResult, BrowserConfig, BrowserHandle};

/// Result of verifying a single fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureReport {
    pub fixture: String,
    pub checks: Vec<AssertionResult>,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

impl FixtureReport {
    pub fn from_checks(fixture: String, checks: Vec<AssertionResult>, duration_ms: u64) -> Self {
        let passed = checks.iter().filter(|check| check.passed).count();
        let failed = checks.len() - passed;
        Self {
            fixture,
            checks,
            passed,
            failed,
            duration_ms,
        }
    }

    pub fn success(&self) -> bool {
        self.failed == 0
    }

    /// Descriptions of the failing checks, in check order.
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.checks
            .iter()
            .filter(|check| !check.passed)
            .map(|check| check.description.as_str())
    }
}

/// Result of verifying every discovered fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub fixtures: Vec<FixtureReport>,
}

impl RunReport {
    pub fn from_fixtures(fixtures: Vec<FixtureReport>, duration_ms: u64) -> Self {
        let passed = fixtures.iter().filter(|fixture| fixture.success()).count();
        Self {
            total: fixtures.len(),
            passed,
            failed: fixtures.len() - passed,
            duration_ms,
            fixtures,
        }
    }

    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Configuration for the verifier
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Directory scanned for `test-*.html`
    pub fixtures_dir: PathBuf,

    /// Browser driver settings
    pub browser: BrowserConfig,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: PathBuf::from("fixtures"),
            browser: BrowserConfig::default(),
        }
    }
}

/// Runs fixtures through the browser strictly one at a time.
pub struct FixtureVerifier {
    config: VerifierConfig,
}

impl FixtureVerifier {
    pub fn new(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// Fixtures matching `test-*.html` in the fixtures directory, in
    /// file-name order.
    pub fn discover_fixtures(&self) -> Result<Vec<PathBuf>> {
        discover_fixtures(&self.config.fixtures_dir)
    }

    /// Verify every discovered fixture sequentially.
    ///
    /// Assertion mismatches are recorded in the report and never stop the
    /// run; a fixture the browser cannot load or evaluate aborts it.
    pub async fn verify_all(&self) -> Result<RunReport> {
        let fixtures = self.discover_fixtures()?;
        if fixtures.is_empty() {
            return Err(Error::NoFixtures {
                path: self.config.fixtures_dir.display().to_string(),
            });
        }

        let browser = BrowserHandle::new(self.config.browser.clone())?;
        let start = Instant::now();
        let mut reports = Vec::with_capacity(fixtures.len());

        info!("Running {} fixture(s)...", fixtures.len());

        for fixture in &fixtures {
            info!("=== Testing: {}", fixture.display());
            let report = self.verify_fixture(&browser, fixture).await?;

            if report.success() {
                info!(
                    "✓ {} ({} checks, {} ms)",
                    report.fixture,
                    report.checks.len(),
                    report.duration_ms
                );
            } else {
                error!(
                    "✗ {} ({} of {} checks failed)",
                    report.fixture,
                    report.failed,
                    report.checks.len()
                );
                for failure in report.failures() {
                    error!("  {}", failure);
                }
            }

            reports.push(report);
        }

        let run = RunReport::from_fixtures(reports, start.elapsed().as_millis() as u64);
        info!("");
        info!(
            "Fixture results: {} passed, {} failed ({} ms)",
            run.passed, run.failed, run.duration_ms
        );
        Ok(run)
    }

    /// Verify one fixture in its own browser context.
    pub async fn verify_fixture(
        &self,
        browser: &BrowserHandle,
        fixture: &Path,
    ) -> Result<FixtureReport> {
        let start = Instant::now();
        let checks = browser.verify_fixture(fixture).await?;
        let name = fixture
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| fixture.display().to_string());
        Ok(FixtureReport::from_checks(
            name,
            checks,
            start.elapsed().as_millis() as u64,
        ))
    }
}

/// Scan a directory (non-recursively) for generated fixtures.
pub fn discover_fixtures(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = Regex::new(r"^test-.*\.html$").expect("fixture pattern is valid");

    let mut fixtures: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| pattern.is_match(name))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    fixtures.sort();
    Ok(fixtures)
}

/// Write the run report as pretty JSON under the output directory.
pub fn write_report(report: &RunReport, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let path = output_dir.join("sortcheck-report.json");
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;

    info!("Results written to: {}", path.display());
    Ok(path)
}
