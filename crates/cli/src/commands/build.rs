//! Fixture generation command

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use sortcheck_harness::{FixtureGenerator, GeneratorConfig};

use crate::output;

#[derive(Args, Clone)]
pub struct BuildArgs {
    /// Fixtures directory holding test-definitions.json and template.html
    #[arg(long, default_value = "fixtures")]
    pub dir: PathBuf,

    /// Definitions file (defaults to <dir>/test-definitions.json)
    #[arg(long)]
    pub definitions: Option<PathBuf>,

    /// Template file (defaults to <dir>/template.html)
    #[arg(long)]
    pub template: Option<PathBuf>,
}

impl BuildArgs {
    pub fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::for_dir(self.dir.clone());
        if let Some(path) = &self.definitions {
            config.definitions_path = path.clone();
        }
        if let Some(path) = &self.template {
            config.template_path = path.clone();
        }
        config
    }
}

pub async fn execute(args: BuildArgs) -> anyhow::Result<()> {
    let config = args.generator_config();
    debug!(
        "Building fixtures from {} with template {}",
        config.definitions_path.display(),
        config.template_path.display()
    );

    let generator = FixtureGenerator::new(config);
    let written = generator.generate_all()?;

    output::print_success(&format!("Generated {} fixture(s)", written.len()));
    Ok(())
}
