//! Sortcheck Harness
//!
//! Builds sortable-table HTML fixtures from JSON suite definitions and
//! verifies them in a headless browser:
//! - renders one self-contained fixture per suite from a handlebars template
//! - drives Playwright (via generated Node scripts) to click column headers
//! - diffs the observed first-column order against the embedded expectations
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     sortcheck-harness                      │
//! ├────────────────────────────────────────────────────────────┤
//! │  FixtureGenerator                                          │
//! │    ├── load test-definitions.json + template.html          │
//! │    ├── render(template, {columns, rows, suite,             │
//! │    │           json_sortresults}) -> html                  │
//! │    └── write test-<suite>.html, one per suite              │
//! ├────────────────────────────────────────────────────────────┤
//! │  FixtureVerifier                                           │
//! │    ├── discover test-*.html in file-name order             │
//! │    ├── BrowserHandle: node + playwright script per fixture │
//! │    │     goto file://, click each header, compare the      │
//! │    │     first-column cells row by row                     │
//! │    └── FixtureReport / RunReport                           │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod browser;
pub mod generate;
pub mod verify;

pub use browser::{AssertionResult, BrowserConfig, BrowserHandle, BrowserKind};
pub use generate::{render_fixture, FixtureGenerator, GeneratorConfig};
pub use verify::{write_report, FixtureReport, FixtureVerifier, RunReport, VerifierConfig};
