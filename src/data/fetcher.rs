//! Fetcher for the template catalogue
//!
//! `MetaFetcher` downloads `meta.json` through the GitHub contents API,
//! rebrands it and keeps the result in an in-memory cache. It can also read an
//! already rebranded catalogue from a deployed API through its proxy route.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::envelope::ContentEnvelope;
use super::{http_client, FetchError, RetrievalError};
use crate::cache::CachePolicy;
use crate::transform::Rebrand;

/// GitHub contents API location of the upstream template catalogue
pub const DEFAULT_SOURCE_URL: &str =
    "https://api.github.com/repos/Dokploy/templates/contents/meta.json";

/// Route appended to the proxy base URL
pub const PROXY_PATH: &str = "/api/templates";

/// Header a proxy uses to report its own cache hit or miss
const PROXY_CACHE_HEADER: &str = "x-cache";

/// Body returned by the proxy route plus its cache diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyDocument {
    /// Decoded response body, returned as-is
    pub document: Value,
    /// Value of the `X-Cache` header, `UNKNOWN` when absent
    pub cache_header: String,
}

/// Client that fetches, rebrands and caches the template catalogue
#[derive(Debug, Clone)]
pub struct MetaFetcher {
    /// HTTP client for making requests
    http_client: Client,
    /// Cache for the last rebranded document
    cache: CachePolicy,
    /// Substitution applied to freshly fetched documents
    rebrand: Rebrand,
    /// Contents API URL (allows override for testing)
    source_url: String,
}

impl MetaFetcher {
    /// Creates a fetcher for the upstream catalogue with an empty cache
    pub fn new() -> Result<Self, RetrievalError> {
        Ok(Self {
            http_client: http_client()?,
            cache: CachePolicy::new(),
            rebrand: Rebrand::default(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
        })
    }

    /// Points the direct path at another contents URL
    pub fn with_source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = source_url.into();
        self
    }

    /// Replaces the cache, e.g. with a custom TTL or pre-populated entry
    pub fn with_cache(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }

    /// Uses a different substitution for fetched documents
    pub fn with_rebrand(mut self, rebrand: Rebrand) -> Self {
        self.rebrand = rebrand;
        self
    }

    /// The URL used by the direct path
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Read access to the cache, for status reporting
    pub fn cache(&self) -> &CachePolicy {
        &self.cache
    }

    /// Fetches the rebranded catalogue, honouring the cache
    ///
    /// # Returns
    /// * `Ok(Value)` - Fresh cached data, newly fetched data, or stale cached
    ///   data when the upstream request failed
    /// * `Err(FetchError::Unavailable)` - If the request failed and nothing is cached
    ///
    /// # Behavior
    /// - Fresh cache at `now` is returned without touching the network
    /// - Otherwise a single GET is issued; success is rebranded and cached at `now`
    /// - Any transport, status or decode failure falls back to cached data
    pub async fn fetch_direct(&mut self, now: DateTime<Utc>) -> Result<Value, FetchError> {
        if self.cache.is_fresh(now) {
            if let Some(cached) = self.cache.get() {
                debug!("using cached template metadata");
                return Ok(cached.clone());
            }
        }

        info!(url = %self.source_url, "fetching fresh template metadata");
        match self.fetch_from_source().await {
            Ok(document) => {
                let document = self.rebrand.apply(document);
                self.cache.put(document.clone(), now);
                info!("template metadata fetched and cached");
                Ok(document)
            }
            Err(err) => match self.cache.get() {
                Some(stale) => {
                    warn!(error = %err, "fetch failed, returning stale cached data");
                    Ok(stale.clone())
                }
                None => Err(FetchError::Unavailable(err)),
            },
        }
    }

    /// Fetches an already rebranded catalogue from `{endpoint_base}/api/templates`
    ///
    /// The body is returned untouched and the cache is neither read nor
    /// written. Failures are returned directly, without fallback.
    pub async fn fetch_via_proxy(
        &self,
        endpoint_base: Option<&str>,
    ) -> Result<ProxyDocument, FetchError> {
        let base = endpoint_base
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .ok_or(FetchError::Config("proxy base URL is required"))?;

        let url = format!("{}{}", base.trim_end_matches('/'), PROXY_PATH);
        info!(url = %url, "fetching template metadata through proxy");
        Ok(self.fetch_from_proxy(&url).await?)
    }

    /// Downloads and decodes the contents envelope
    async fn fetch_from_source(&self) -> Result<Value, RetrievalError> {
        let response = self.http_client.get(&self.source_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Status(status));
        }

        let body = response.bytes().await?;
        let envelope: ContentEnvelope = serde_json::from_slice(&body)?;
        envelope.decode()
    }

    async fn fetch_from_proxy(&self, url: &str) -> Result<ProxyDocument, RetrievalError> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Status(status));
        }

        let cache_header = response
            .headers()
            .get(PROXY_CACHE_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("UNKNOWN")
            .to_string();
        debug!(cache = %cache_header, "proxy cache header");

        let body = response.bytes().await?;
        Ok(ProxyDocument {
            document: serde_json::from_slice(&body)?,
            cache_header,
        })
    }
}
