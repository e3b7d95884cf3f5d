//! Counters for the caching logic
//!
//! Thread-safe counters recording fetch traffic and lookup outcomes.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for cache operations
#[derive(Default, Debug)]
pub struct CacheMetrics {
    /// Friend-list fetches issued
    pub friend_fetches: AtomicU64,
    /// Member-list fetches issued
    pub member_fetches: AtomicU64,
    /// Fetches that failed or timed out
    pub fetch_failures: AtomicU64,
    /// Callers that waited on another caller's fetch instead of issuing one
    pub coalesced_waits: AtomicU64,
    /// Lookups answered with a value
    pub hits: AtomicU64,
    /// Lookups answered with "unknown"
    pub misses: AtomicU64,
    /// Roster pushes applied
    pub roster_pushes: AtomicU64,
}

impl CacheMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fetch(&self, friends: bool) {
        if friends {
            self.friend_fetches.fetch_add(1, Ordering::Relaxed);
        } else {
            self.member_fetches.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_coalesced(&self) {
        self.coalesced_waits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup outcome
    pub fn record_lookup(&self, found: bool) {
        if found {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_roster_push(&self) {
        self.roster_pushes.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters
    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            friend_fetches: self.friend_fetches.load(Ordering::Relaxed),
            member_fetches: self.member_fetches.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            coalesced_waits: self.coalesced_waits.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            roster_pushes: self.roster_pushes.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of `CacheMetrics`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStatsSnapshot {
    pub friend_fetches: u64,
    pub member_fetches: u64,
    pub fetch_failures: u64,
    pub coalesced_waits: u64,
    pub hits: u64,
    pub misses: u64,
    pub roster_pushes: u64,
}

impl CacheStatsSnapshot {
    /// Fraction of lookups answered with a value
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}
