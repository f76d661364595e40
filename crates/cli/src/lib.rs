//! Sortcheck CLI
//!
//! Command-line interface for building sortable-table fixtures and
//! verifying them in a headless browser.

pub mod commands;
pub mod output;
