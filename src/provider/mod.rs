//! Cache Provider Module
//!
//! Sync and async cache-access contracts, the raw provider talking to a
//! backing store, the serializing wrapper, and the provider factory.
//!
//! Both contracts share one implementation per provider: the async methods
//! only differ from the sync ones by a pre-flight cancellation check and by
//! awaiting the store. Decoding of reads and encoding of writes go through
//! the same helpers on either path.

mod factory;
mod raw;
mod serializing;

#[cfg(test)]
mod property_tests;

pub use factory::{for_result_type, from_config, raw_provider, RawCacheProvider};
pub use raw::CacheProvider;
pub use serializing::{CacheProviderExt, SerializingCacheProvider};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{CacheError, Result};
use crate::ttl::TtlStrategy;

// == Sync Cache Provider ==
/// Blocking cache access for values of type `T`.
pub trait SyncCacheProvider<T>: Send + Sync {
    /// Returns the cached value, or `None` on a miss.
    ///
    /// A key holding the empty sentinel is a miss.
    fn get(&self, key: &str) -> Result<Option<T>>;

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// `None` is written as the empty sentinel and reads back as a miss.
    fn put(&self, key: &str, value: Option<&T>, ttl: &dyn TtlStrategy<T>) -> Result<()>;

    /// Returns `(true, value)` on a hit and `(false, T::default())` on a miss.
    fn try_get(&self, key: &str) -> Result<(bool, T)>
    where
        T: Default,
    {
        Ok(match self.get(key)? {
            Some(value) => (true, value),
            None => (false, T::default()),
        })
    }
}

// == Async Cache Provider ==
/// Non-blocking cache access for values of type `T`.
///
/// Every method fails with [`CacheError::Cancelled`] without touching the
/// store if `cancel` is already cancelled. Once the store call is issued it
/// runs to completion. `preserve_context` has no effect: providers neither
/// capture nor restore any execution context.
#[async_trait]
pub trait AsyncCacheProvider<T: Send + Sync>: Send + Sync {
    async fn get_async(
        &self,
        key: &str,
        cancel: &CancellationToken,
        preserve_context: bool,
    ) -> Result<Option<T>>;

    async fn put_async(
        &self,
        key: &str,
        value: Option<&T>,
        ttl: &dyn TtlStrategy<T>,
        cancel: &CancellationToken,
        preserve_context: bool,
    ) -> Result<()>;

    async fn try_get_async(
        &self,
        key: &str,
        cancel: &CancellationToken,
        preserve_context: bool,
    ) -> Result<(bool, T)>
    where
        T: Default,
    {
        Ok(match self.get_async(key, cancel, preserve_context).await? {
            Some(value) => (true, value),
            None => (false, T::default()),
        })
    }
}

// == Cache Access ==
/// Both contracts at once, for use behind a trait object.
pub trait CacheAccess<T: Send + Sync>: SyncCacheProvider<T> + AsyncCacheProvider<T> {}

impl<T, P> CacheAccess<T> for P
where
    T: Send + Sync,
    P: SyncCacheProvider<T> + AsyncCacheProvider<T>,
{
}

/// Fails with `Cancelled` if cancellation has already been requested.
pub(crate) fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(CacheError::Cancelled);
    }
    Ok(())
}
