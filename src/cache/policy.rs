//! Time-to-live policy for the cached catalogue
//!
//! Provides a `CachePolicy` that owns a single cached document with its fetch
//! timestamp. Callers pass the current time in, so freshness is decided purely
//! from the arguments.

use chrono::{DateTime, Duration, Local, Utc};
use serde_json::Value;
use std::fmt;

/// Default time-to-live for the cached catalogue in hours
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// The cached document and when it was fetched
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached data
    data: Value,
    /// When the data was cached
    cached_at: DateTime<Utc>,
}

/// Timing details of a populated cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTimes {
    /// Seconds since the entry was cached, never negative
    pub age_seconds: i64,
    /// Seconds until the entry goes stale, zero once it has
    pub expires_in_seconds: i64,
    /// When the entry was cached
    pub cached_at: DateTime<Utc>,
    /// When the entry stops being fresh
    pub expires_at: DateTime<Utc>,
}

/// Derived view of the cache at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Nothing has been cached yet
    Empty,
    /// Cached data is within its TTL
    Valid(CacheTimes),
    /// Cached data is past its TTL but still usable as a fallback
    Stale(CacheTimes),
}

impl CacheStatus {
    /// Short lowercase label: `empty`, `valid` or `stale`
    pub fn label(&self) -> &'static str {
        match self {
            CacheStatus::Empty => "empty",
            CacheStatus::Valid(_) => "valid",
            CacheStatus::Stale(_) => "stale",
        }
    }

    /// Timing details, absent for an empty cache
    pub fn times(&self) -> Option<&CacheTimes> {
        match self {
            CacheStatus::Empty => None,
            CacheStatus::Valid(times) | CacheStatus::Stale(times) => Some(times),
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(times) = self.times() else {
            return f.write_str(self.label());
        };
        let local = |t: DateTime<Utc>| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
        write!(
            f,
            "{} (age {}s, expires in {}s, cached at {}, expires at {})",
            self.label(),
            times.age_seconds,
            times.expires_in_seconds,
            local(times.cached_at),
            local(times.expires_at),
        )
    }
}

/// Holds at most one cached document and decides whether it is still fresh
///
/// The TTL is fixed when the policy is built. Expired entries stay available
/// through [`CachePolicy::get`] until they are replaced, which lets callers
/// degrade to stale data when a refresh fails.
#[derive(Debug, Clone)]
pub struct CachePolicy {
    entry: Option<CacheEntry>,
    ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CachePolicy {
    /// Creates an empty cache with the default 24 hour TTL
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(DEFAULT_TTL_HOURS))
    }

    /// Creates an empty cache with a custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { entry: None, ttl }
    }

    /// The TTL this policy was built with
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns true if an entry exists and is younger than the TTL at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|entry| now.signed_duration_since(entry.cached_at) < self.ttl)
    }

    /// Returns the cached document regardless of freshness
    pub fn get(&self) -> Option<&Value> {
        self.entry.as_ref().map(|entry| &entry.data)
    }

    /// Replaces the cached document and its timestamp together
    pub fn put(&mut self, data: Value, now: DateTime<Utc>) {
        self.entry = Some(CacheEntry {
            data,
            cached_at: now,
        });
    }

    /// Describes the cache as seen at `now`
    pub fn status(&self, now: DateTime<Utc>) -> CacheStatus {
        let Some(entry) = &self.entry else {
            return CacheStatus::Empty;
        };

        let age = now
            .signed_duration_since(entry.cached_at)
            .max(Duration::zero());
        let times = CacheTimes {
            age_seconds: age.num_seconds(),
            expires_in_seconds: (self.ttl - age).num_seconds().max(0),
            cached_at: entry.cached_at,
            expires_at: entry.cached_at + self.ttl,
        };

        if self.is_fresh(now) {
            CacheStatus::Valid(times)
        } else {
            CacheStatus::Stale(times)
        }
    }
}
