//! End-to-end command: build fixtures, then verify them

use std::path::PathBuf;

use clap::Args;

use crate::commands::{build, verify};
use crate::output::OutputFormat;

#[derive(Args, Clone)]
pub struct RunArgs {
    /// Fixtures directory holding the inputs and receiving the fixtures
    #[arg(long, default_value = "fixtures")]
    pub dir: PathBuf,

    /// Definitions file (defaults to <dir>/test-definitions.json)
    #[arg(long)]
    pub definitions: Option<PathBuf>,

    /// Template file (defaults to <dir>/template.html)
    #[arg(long)]
    pub template: Option<PathBuf>,

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

/// Returns whether every fixture passed. Generation must finish for all
/// suites before the first fixture is verified.
pub async fn execute(args: RunArgs, format: OutputFormat) -> anyhow::Result<bool> {
    build::execute(build::BuildArgs {
        dir: args.dir.clone(),
        definitions: args.definitions,
        template: args.template,
    })
    .await?;

    verify::execute(
        verify::VerifyArgs {
            dir: args.dir,
            browser: args.browser,
            viewport_width: args.viewport_width,
            viewport_height: args.viewport_height,
            output: args.output,
            no_report: args.no_report,
        },
        format,
    )
    .await
}
