//! Sortcheck CLI - Main Entry Point
//!
//! Builds sortable-table HTML fixtures from JSON suite definitions and
//! verifies them by driving a headless browser over each one.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{build, run, verify};

/// Sortcheck - fixture builder and verifier for sortable tables
#[derive(Parser)]
#[command(name = "sortcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render HTML fixtures from the suite definitions
    Build(build::BuildArgs),

    /// Drive generated fixtures through a headless browser
    Verify(verify::VerifyArgs),

    /// Build fixtures, then verify them
    Run(run::RunArgs),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let ok = match cli.command {
        Commands::Build(args) => {
            build::execute(args).await?;
            true
        }
        Commands::Verify(args) => verify::execute(args, cli.format).await?,
        Commands::Run(args) => run::execute(args, cli.format).await?,
        Commands::Version => {
            println!("sortcheck {}", sortcheck_common::VERSION);
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
