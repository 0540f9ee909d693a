//! Command-line interface parsing for hawiyat-meta
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a validated `RunConfig` for the orchestrator.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::data::DEFAULT_SOURCE_URL;

/// Default file for the rebranded catalogue
pub const DEFAULT_OUTPUT: &str = "hawiyat_templates.json";

/// Default file for the catalogue read through a proxy
pub const DEFAULT_PROXY_OUTPUT: &str = "api_response.json";

/// Default number of object entries shown in the preview
pub const DEFAULT_PREVIEW_ENTRIES: usize = 3;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// An output path argument was empty
    #[error("Invalid value for {0}: path must not be empty")]
    EmptyPath(&'static str),
}

/// hawiyat-meta - Fetch and rebrand the Dokploy template catalogue
#[derive(Parser, Debug)]
#[command(name = "hawiyat-meta")]
#[command(about = "Fetch the Dokploy template catalogue and rebrand it for Hawiyat")]
#[command(version)]
pub struct Cli {
    /// File the rebranded catalogue is written to
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Do not write the rebranded catalogue to disk
    #[arg(long)]
    pub no_save: bool,

    /// Number of entries shown when the catalogue is an object
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PREVIEW_ENTRIES)]
    pub preview_entries: usize,

    /// Base URL of a deployed API; also fetch `<URL>/api/templates`
    ///
    /// Examples:
    ///   hawiyat-meta --proxy http://localhost:3000
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// File the proxy response is written to
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PROXY_OUTPUT)]
    pub proxy_output: String,

    /// Contents API URL of the upstream catalogue
    #[arg(long, value_name = "URL", default_value = DEFAULT_SOURCE_URL, hide = true)]
    pub source_url: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Configuration derived from CLI arguments for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Where to save the rebranded catalogue, if at all
    pub output: Option<PathBuf>,
    /// Object entries to preview
    pub preview_entries: usize,
    /// Proxy base URL, when the proxy path should run
    pub proxy_base: Option<String>,
    /// Where to save the proxy response
    pub proxy_output: PathBuf,
    /// Contents API URL for the direct path
    pub source_url: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output: Some(PathBuf::from(DEFAULT_OUTPUT)),
            preview_entries: DEFAULT_PREVIEW_ENTRIES,
            proxy_base: None,
            proxy_output: PathBuf::from(DEFAULT_PROXY_OUTPUT),
            source_url: DEFAULT_SOURCE_URL.to_string(),
        }
    }
}

impl RunConfig {
    /// Creates a RunConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(RunConfig)` with appropriate settings
    /// * `Err(CliError)` if an output path is empty
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.output.trim().is_empty() {
            return Err(CliError::EmptyPath("--output"));
        }
        if cli.proxy_output.trim().is_empty() {
            return Err(CliError::EmptyPath("--proxy-output"));
        }

        Ok(RunConfig {
            output: (!cli.no_save).then(|| PathBuf::from(&cli.output)),
            preview_entries: cli.preview_entries,
            // An empty --proxy is passed through so the fetcher reports it
            proxy_base: cli.proxy.clone(),
            proxy_output: PathBuf::from(&cli.proxy_output),
            source_url: cli.source_url.clone(),
        })
    }
}

/// Maps `-v` occurrences to a default log filter
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
