//! Playwright browser automation
//!
//! Each fixture is verified by a generated, self-contained Node script: it
//! launches a headless browser, opens the fixture's `file://` URL, runs the
//! in-page check routine, and prints the resulting assertion list as JSON on
//! stdout. The node process is the isolation boundary between fixtures.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::debug;

use sortcheck_common::{Error, Result};

/// A single pass/fail check produced by the in-page verification routine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    pub description: String,
    pub passed: bool,
}

/// Payload the generated script prints on its way out.
#[derive(Debug, Deserialize)]
struct ScriptOutcome {
    success: bool,
    #[serde(default)]
    checks: Vec<AssertionResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserKind {
    fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Webkit => "webkit",
        }
    }
}

/// Configuration for the browser driver
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub browser: BrowserKind,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            browser: BrowserKind::Chromium,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

/// Handle for running fixture-verification scripts.
pub struct BrowserHandle {
    config: BrowserConfig,
}

impl BrowserHandle {
    pub fn new(config: BrowserConfig) -> Result<Self> {
        Self::check_playwright_installed()?;
        Ok(Self { config })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> Result<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(Error::PlaywrightNotFound),
        }
    }

    /// Run the verification routine against one fixture and decode its
    /// assertion results.
    pub async fn verify_fixture(&self, fixture: &Path) -> Result<Vec<AssertionResult>> {
        let url = file_url(fixture)?;
        let script = self.build_script(&url);
        self.run_script(&script).await
    }

    /// Render the Node script that loads one fixture and checks it.
    ///
    /// The check routine runs in-page. It asserts the setup invariants first
    /// (expected tuples per column, tuple entries per data row), then clicks
    /// each header cell in column order and compares every first-column cell
    /// against the expected value for that column. Mismatches are recorded,
    /// never thrown; only structural failures (missing table, load errors)
    /// abort the script.
    pub fn build_script(&self, fixture_url: &str) -> String {
        format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: true }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();

  try {{
    await page.goto('{url}');

    // The fixture embeds its expected results; hand them to the check
    // routine as an argument so the routine itself reads no globals.
    const sortResults = await page.evaluate(() => SORTRESULTS);

    const checks = await page.evaluate((expected) => {{
      const checks = [];
      const record = (description, passed) => checks.push({{ description, passed }});

      const table = document.querySelector('table.sortable');

      record('expected results declare one entry per column ' +
        '(expected columns=' + expected.length +
        ', header cells=' + table.rows[0].cells.length + ')',
        expected.length === table.rows[0].cells.length);

      const firstTuple = expected.length === 0 ? [] : expected[0];
      record('expected results have one item per data row ' +
        '(tuple length=' + firstTuple.length +
        ', data rows=' + (table.rows.length - 1) + ')',
        firstTuple.length === table.rows.length - 1);

      for (let column = 0; column < expected.length; column++) {{
        const click = new MouseEvent('click', {{ bubbles: true, cancelable: true }});
        table.rows[0].cells[column].dispatchEvent(click);

        // Table rows run 1..N (row 0 holds the headers); expected tuples
        // run 0..N-1.
        for (let row = 1; row < table.rows.length; row++) {{
          const predicted = expected[column][row - 1];
          const actual = table.rows[row].cells[0].innerHTML;
          record('Sorted on column ' + (column + 1) +
            "; comparing row " + row +
            " predicted value '" + predicted +
            "' with actual value '" + actual + "'",
            actual === predicted);
        }}
      }}

      return checks;
    }}, sortResults);

    console.log(JSON.stringify({{ success: true, checks }}));
  }} catch (error) {{
    console.error(JSON.stringify({{ success: false, error: error.message }}));
    process.exit(1);
  }} finally {{
    await browser.close();
  }}
}})();
"#,
            browser = self.config.browser.as_str(),
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            url = fixture_url,
        )
    }

    /// Execute a generated script via node and decode the result payload.
    async fn run_script(&self, script: &str) -> Result<Vec<AssertionResult>> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("verify.js");
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        // Playwright resolves relative to the script; point NODE_PATH at the
        // invoking project's node_modules so local installs are found too.
        let node_path = std::env::current_dir()?.join("node_modules");
        let output = TokioCommand::new("node")
            .arg(&script_path)
            .current_dir(temp_dir.path())
            .env("NODE_PATH", node_path)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = last_outcome(&stderr)
                .and_then(|outcome| outcome.error)
                .unwrap_or_else(|| stderr.trim().to_string());
            return Err(Error::Browser(detail));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let outcome = last_outcome(&stdout).ok_or_else(|| {
            Error::Browser(format!("driver produced no result payload: {}", stdout.trim()))
        })?;

        if !outcome.success {
            return Err(Error::Browser(
                outcome.error.unwrap_or_else(|| "unknown driver failure".to_string()),
            ));
        }

        Ok(outcome.checks)
    }
}

/// The result payload is the last JSON line of the stream; anything before it
/// is console noise from the page or from Playwright itself.
fn last_outcome(stream: &str) -> Option<ScriptOutcome> {
    stream
        .lines()
        .rev()
        .find_map(|line| serde_json::from_str::<ScriptOutcome>(line).ok())
}

/// Convert a fixture path into an encoded `file://` URL.
///
/// Relative paths resolve against the current directory, separators are
/// normalized to forward slashes, and a Windows drive letter gains a leading
/// slash.
pub fn file_url(path: &Path) -> Result<String> {
    let absolute: PathBuf = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut name = absolute.to_string_lossy().replace('\\', "/");
    if !name.starts_with('/') {
        name.insert(0, '/');
    }
    Ok(format!("file://{}", encode_uri(&name)))
}

// Percent-encode the bytes encodeURI would, leaving URL structure intact.
fn encode_uri(input: &str) -> String {
    const UNRESERVED: &str = "-_.!~*'();/?:@&=+$,#";
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        let c = byte as char;
        if c.is_ascii_alphanumeric() || UNRESERVED.contains(c) {
            out.push(c);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
