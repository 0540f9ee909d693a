//! hawiyat-meta - Fetch and rebrand the Dokploy template catalogue
//!
//! Runs a single fetch cycle: download `meta.json`, rebrand it, save it and
//! print a preview.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hawiyat_meta::cli::{log_filter, Cli, RunConfig};
use hawiyat_meta::run;

/// Sets up logging to stderr; `RUST_LOG` overrides the `-v` level
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match RunConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match run::run(&config).await {
        Ok(summary) if summary.succeeded() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Failed to fetch data: {}", err);
            ExitCode::FAILURE
        }
    }
}
