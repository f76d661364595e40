//! Fixture verification command

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use sortcheck_harness::{
    write_report, BrowserConfig, BrowserKind, FixtureVerifier, VerifierConfig,
};

use crate::output::{self, OutputFormat};

#[derive(Args, Clone)]
pub struct VerifyArgs {
    /// Fixtures directory scanned for test-*.html
    #[arg(long, default_value = "fixtures")]
    pub dir: PathBuf,

    /// Browser engine (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    pub browser: String,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    pub viewport_width: u32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    pub viewport_height: u32,

    /// Directory receiving the JSON run report
    #[arg(long, default_value = "test-results")]
    pub output: PathBuf,

    /// Skip writing the JSON run report
    #[arg(long)]
    pub no_report: bool,
}

impl VerifyArgs {
    pub fn verifier_config(&self) -> anyhow::Result<VerifierConfig> {
        Ok(VerifierConfig {
            fixtures_dir: self.dir.clone(),
            browser: BrowserConfig {
                browser: browser_kind(&self.browser)?,
                viewport_width: self.viewport_width,
                viewport_height: self.viewport_height,
            },
        })
    }
}

fn browser_kind(name: &str) -> anyhow::Result<BrowserKind> {
    match name {
        "chromium" => Ok(BrowserKind::Chromium),
        "firefox" => Ok(BrowserKind::Firefox),
        "webkit" => Ok(BrowserKind::Webkit),
        other => anyhow::bail!("unknown browser: {other}"),
    }
}

/// Returns whether every fixture passed.
pub async fn execute(args: VerifyArgs, format: OutputFormat) -> anyhow::Result<bool> {
    debug!("Verifying fixtures in {}", args.dir.display());

    let verifier = FixtureVerifier::new(args.verifier_config()?);
    let report = verifier.verify_all().await?;

    if !args.no_report {
        write_report(&report, &args.output)?;
    }
    output::print_run_report(&report, format);

    Ok(report.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_names_map_to_engines() {
        assert_eq!(browser_kind("chromium").unwrap(), BrowserKind::Chromium);
        assert_eq!(browser_kind("firefox").unwrap(), BrowserKind::Firefox);
        assert_eq!(browser_kind("webkit").unwrap(), BrowserKind::Webkit);
        assert!(browser_kind("netscape").is_err());
    }
}
