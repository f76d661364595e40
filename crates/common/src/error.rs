//! Error types for Sortcheck
//!
//! Structural failures (unreadable inputs, malformed JSON, template errors,
//! a browser that cannot load a fixture) are `Error` values and abort the
//! sequential pipeline. Content mismatches found during verification are NOT
//! errors; they are recorded as failing assertions and reported.

use thiserror::Error;

/// Result type alias using the Sortcheck Error
pub type Result<T> = std::result::Result<T, Error>;

/// Sortcheck error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("definitions file not found: {path}")]
    DefinitionsNotFound { path: String },

    #[error("template file not found: {path}")]
    TemplateNotFound { path: String },

    #[error("no fixtures matching test-*.html in {path}")]
    NoFixtures { path: String },

    #[error("Playwright not found. Install with: npx playwright install chromium")]
    PlaywrightNotFound,

    #[error("browser error: {0}")]
    Browser(String),

    #[error("internal error: {0}")]
    Internal(String),
}
