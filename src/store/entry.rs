//! Store Entry Module
//!
//! Defines the structure for individual store entries with expiration support.

use std::time::Duration;

use chrono::Utc;

use crate::ttl::StoreOptions;

// == Store Entry ==
/// Represents a single stored value with expiration metadata.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored bytes
    pub value: Vec<u8>,
    /// Last read or refresh timestamp (Unix milliseconds)
    pub last_accessed: i64,
    /// Hard expiration timestamp (Unix milliseconds), None = no hard limit
    pub absolute_expires_at: Option<i64>,
    /// Idle period after which the entry expires, None = not sliding
    pub sliding: Option<Duration>,
    /// Options the entry was written with
    pub options: StoreOptions,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new entry from the options it was written with.
    ///
    /// An absolute point in time wins over a relative duration; a sliding
    /// window applies on top of either.
    pub fn new(value: Vec<u8>, options: StoreOptions) -> Self {
        let now = current_timestamp_ms();
        let absolute_expires_at = match (
            options.absolute_expiration,
            options.absolute_expiration_relative_to_now,
        ) {
            (Some(at), _) => Some(at.timestamp_millis()),
            (None, Some(relative)) => Some(now.saturating_add(duration_ms(relative))),
            (None, None) => None,
        };

        Self {
            value,
            last_accessed: now,
            absolute_expires_at,
            sliding: options.sliding_expiration,
            options,
        }
    }

    // == Expires At ==
    /// Returns the effective expiration timestamp, or None if the entry never expires.
    pub fn expires_at(&self) -> Option<i64> {
        let sliding_deadline = self
            .sliding
            .map(|window| self.last_accessed.saturating_add(duration_ms(window)));

        match (self.absolute_expires_at, sliding_deadline) {
            (Some(a), Some(s)) => Some(a.min(s)),
            (a, s) => a.or(s),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        match self.expires_at() {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }

    // == Touch ==
    /// Restarts the sliding window. No-op for non-sliding entries.
    pub fn touch(&mut self) {
        if self.sliding.is_some() {
            self.last_accessed = current_timestamp_ms();
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn duration_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
