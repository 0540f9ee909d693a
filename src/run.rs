//! One end-to-end fetch cycle
//!
//! Fetches the rebranded catalogue, reports the cache state, saves the result
//! and prints a short preview. When a proxy base URL is configured the proxy
//! route is read afterwards and saved to its own file, whether or not the
//! direct fetch succeeded.

use std::path::Path;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::cli::RunConfig;
use crate::data::{FetchError, MetaFetcher};
use crate::persist;

/// Characters of the first array item shown in the preview
pub const PREVIEW_CHARS: usize = 500;

/// Which fetch paths produced a catalogue during one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// The direct fetch returned data (fresh or stale)
    pub direct: bool,
    /// The proxy fetch returned data; `None` when no proxy was configured
    pub proxy: Option<bool>,
}

impl RunSummary {
    /// True when at least one path produced a catalogue
    pub fn succeeded(&self) -> bool {
        self.direct || self.proxy == Some(true)
    }
}

/// Runs one fetch cycle as described by `config`
///
/// The direct and proxy paths run independently: a failure on one is
/// reported under its own message and does not stop the other.
///
/// # Returns
/// * `Ok(RunSummary)` describing which paths produced data; save failures are
///   reported but do not count as path failures
/// * `Err(FetchError)` if the HTTP client could not be built
pub async fn run(config: &RunConfig) -> Result<RunSummary, FetchError> {
    let mut fetcher = MetaFetcher::new()?.with_source_url(config.source_url.as_str());

    let direct = match fetch_direct_and_report(&mut fetcher, config).await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "direct fetch failed");
            eprintln!("Failed to fetch data: {}", err);
            false
        }
    };

    let proxy = match config.proxy_base.as_deref() {
        Some(base) => match fetch_proxy_and_report(&fetcher, base, config).await {
            Ok(()) => Some(true),
            Err(err) => {
                warn!(error = %err, "proxy fetch failed");
                eprintln!("Failed to fetch from API: {}", err);
                Some(false)
            }
        },
        None => None,
    };

    Ok(RunSummary { direct, proxy })
}

async fn fetch_direct_and_report(
    fetcher: &mut MetaFetcher,
    config: &RunConfig,
) -> Result<(), FetchError> {
    println!("=== Fetching template metadata from {} ===", fetcher.source_url());
    let data = fetcher.fetch_direct(Utc::now()).await?;
    println!("Successfully fetched {} items", item_count(&data));
    println!("Cache status: {}", fetcher.cache().status(Utc::now()));

    if let Some(path) = &config.output {
        save_and_report(&data, path);
    }

    if let Some(preview) = preview(&data, config.preview_entries) {
        println!("\n{}", preview);
    }
    Ok(())
}

async fn fetch_proxy_and_report(
    fetcher: &MetaFetcher,
    base: &str,
    config: &RunConfig,
) -> Result<(), FetchError> {
    println!("\n=== Fetching template metadata through {} ===", base);
    let proxied = fetcher.fetch_via_proxy(Some(base)).await?;
    println!("Cache Status: {}", proxied.cache_header);
    println!(
        "Successfully fetched from API: {} items",
        item_count(&proxied.document)
    );
    save_and_report(&proxied.document, &config.proxy_output);
    Ok(())
}

/// Saves `data` and prints the outcome; failures are logged, not returned
fn save_and_report(data: &Value, path: &Path) {
    match persist::save(data, path) {
        Ok(()) => {
            info!(path = %path.display(), "saved template metadata");
            println!("Data saved to {}", path.display());
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to save template metadata");
            println!("Error saving to {}: {}", path.display(), err);
        }
    }
}

/// Number of top-level items: elements of an array or entries of an object
pub fn item_count(data: &Value) -> usize {
    match data {
        Value::Array(items) => items.len(),
        Value::Object(entries) => entries.len(),
        Value::Null => 0,
        _ => 1,
    }
}

/// Builds the preview block for `data`
///
/// Arrays show their first element, cut to [`PREVIEW_CHARS`] characters.
/// Objects show their first `entries` entries. Anything else has no preview.
pub fn preview(data: &Value, entries: usize) -> Option<String> {
    match data {
        Value::Array(items) => {
            let first = items.first()?;
            let text: String = format!("{:#}", first).chars().take(PREVIEW_CHARS).collect();
            Some(format!("=== Preview of first item ===\n{}...", text))
        }
        Value::Object(map) => {
            let head: Map<String, Value> = map
                .iter()
                .take(entries)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            Some(format!("=== Preview of data ===\n{:#}", Value::Object(head)))
        }
        _ => None,
    }
}
