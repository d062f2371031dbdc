//! Raw Provider Module
//!
//! Provider handing a store representation (`String` or `Vec<u8>`) straight
//! to the backing store.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::context::Context;
use crate::error::Result;
use crate::provider::{ensure_not_cancelled, AsyncCacheProvider, SyncCacheProvider};
use crate::representation::Representation;
use crate::store::BackingStore;
use crate::ttl::{StoreOptions, TtlStrategy};

// == Cache Provider ==
/// Cache provider over a backing store, fixed to representation `R`.
///
/// The store is shared, not owned; cloning the provider shares it too.
pub struct CacheProvider<R> {
    store: Arc<dyn BackingStore>,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for CacheProvider<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _marker: PhantomData,
        }
    }
}

impl<R: Representation> CacheProvider<R> {
    // == Constructor ==
    pub fn new(store: Arc<dyn BackingStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Returns the backing store this provider writes through to.
    pub fn store(&self) -> &Arc<dyn BackingStore> {
        &self.store
    }

    // == Decode ==
    /// Turns a store read into a value; absent and empty both mean a miss.
    fn decode(key: &str, raw: Option<Vec<u8>>) -> Result<Option<R>> {
        match raw {
            Some(bytes) if !bytes.is_empty() => {
                trace!("Cache hit for '{}' ({} bytes)", key, bytes.len());
                R::from_stored(bytes).map(Some)
            }
            _ => {
                trace!("Cache miss for '{}'", key);
                Ok(None)
            }
        }
    }

    // == Encode ==
    /// Resolves the TTL and produces the bytes and options to write.
    fn encode(
        key: &str,
        value: Option<&R>,
        ttl: &dyn TtlStrategy<R>,
    ) -> (Vec<u8>, StoreOptions) {
        let resolved = ttl.get_ttl(&Context::new(key), value);
        let bytes = value.map(R::to_stored).unwrap_or_default();
        trace!(
            "Writing {} bytes for '{}' (ttl {:?}, sliding: {})",
            bytes.len(),
            key,
            resolved.duration,
            resolved.sliding
        );
        (bytes, StoreOptions::from(resolved))
    }
}

impl<R: Representation> SyncCacheProvider<R> for CacheProvider<R> {
    fn get(&self, key: &str) -> Result<Option<R>> {
        let raw = self.store.read(key)?;
        Self::decode(key, raw)
    }

    fn put(&self, key: &str, value: Option<&R>, ttl: &dyn TtlStrategy<R>) -> Result<()> {
        let (bytes, options) = Self::encode(key, value, ttl);
        self.store.write(key, bytes, &options)?;
        Ok(())
    }
}

#[async_trait]
impl<R: Representation> AsyncCacheProvider<R> for CacheProvider<R> {
    async fn get_async(
        &self,
        key: &str,
        cancel: &CancellationToken,
        _preserve_context: bool,
    ) -> Result<Option<R>> {
        ensure_not_cancelled(cancel)?;
        let raw = self.store.read_async(key, cancel).await?;
        Self::decode(key, raw)
    }

    async fn put_async(
        &self,
        key: &str,
        value: Option<&R>,
        ttl: &dyn TtlStrategy<R>,
        cancel: &CancellationToken,
        _preserve_context: bool,
    ) -> Result<()> {
        ensure_not_cancelled(cancel)?;
        let (bytes, options) = Self::encode(key, value, ttl);
        self.store.write_async(key, bytes, &options, cancel).await?;
        Ok(())
    }
}
