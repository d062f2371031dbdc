//! Backing Store Module
//!
//! The minimal byte-oriented capability providers call through, plus an
//! in-memory implementation with absolute, relative and sliding expiration.

mod entry;
mod memory;
mod stats;

pub use entry::{current_timestamp_ms, StoreEntry};
pub use memory::MemoryStore;
pub use stats::StoreStats;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::ttl::StoreOptions;

// == Public Constants ==
/// Maximum allowed key length in bytes for [`MemoryStore`]
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes for [`MemoryStore`]
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Result type for backing-store calls.
///
/// Store failures are opaque to the providers and are handed back to the
/// caller as-is.
pub type StoreResult<T> = anyhow::Result<T>;

// == Backing Store ==
/// External key-value store holding raw bytes.
///
/// Implementations must be safe for concurrent use; providers never lock
/// around store calls. `None` from a read means the key is absent.
#[async_trait]
pub trait BackingStore: Send + Sync {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    fn write(&self, key: &str, value: Vec<u8>, options: &StoreOptions) -> StoreResult<()>;

    async fn read_async(
        &self,
        key: &str,
        cancel: &CancellationToken,
    ) -> StoreResult<Option<Vec<u8>>>;

    async fn write_async(
        &self,
        key: &str,
        value: Vec<u8>,
        options: &StoreOptions,
        cancel: &CancellationToken,
    ) -> StoreResult<()>;
}
