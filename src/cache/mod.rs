//! In-memory cache for the fetched template catalogue
//!
//! Holds at most one document together with the instant it was fetched and a
//! time-to-live. Expired entries are still handed out through `get`, so the
//! fetcher can fall back to stale data when the upstream API is unavailable.
//! Nothing here touches the disk; the cache ends with the process.

mod policy;

pub use policy::{CachePolicy, CacheStatus, CacheTimes, DEFAULT_TTL_HOURS};
