//! Store Statistics Module
//!
//! Tracks store traffic: calls made, hits, misses and expirations.

use serde::Serialize;

// == Store Stats ==
/// Counters for calls that reached the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of read calls
    pub reads: u64,
    /// Number of write calls
    pub writes: u64,
    /// Reads that found a live entry
    pub hits: u64,
    /// Reads that found nothing (absent or expired)
    pub misses: u64,
    /// Entries dropped because they expired
    pub expirations: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl StoreStats {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total number of calls that reached the store.
    pub fn calls(&self) -> u64 {
        self.reads + self.writes
    }

    pub fn record_read(&mut self, hit: bool) {
        self.reads += 1;
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
