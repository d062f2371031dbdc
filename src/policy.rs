//! Cache Policy Module
//!
//! Cache-aside execution over a cache provider: return the cached result when
//! there is one, otherwise run the operation and cache what it produced.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::context::Context;
use crate::error::CacheError;
use crate::provider::{AsyncCacheProvider, CacheAccess, SyncCacheProvider};
use crate::ttl::TtlStrategy;

type KeyFn = dyn Fn(&Context) -> String + Send + Sync;

// == Cache Policy ==
/// Cache-aside policy for operations producing `T`.
///
/// Cache failures never fail the execution: a failed read counts as a miss
/// and a failed write is dropped. Both are logged at `warn`.
pub struct CachePolicy<T: Send + Sync> {
    provider: Arc<dyn CacheAccess<T>>,
    ttl: Arc<dyn TtlStrategy<T>>,
    key_fn: Option<Arc<KeyFn>>,
}

impl<T: Send + Sync> Clone for CachePolicy<T> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            ttl: Arc::clone(&self.ttl),
            key_fn: self.key_fn.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> CachePolicy<T> {
    // == Constructor ==
    /// Creates a policy keyed by the context's operation key.
    ///
    /// # Arguments
    /// * `provider` - where results are cached
    /// * `ttl` - lifetime of cached results
    pub fn new(provider: Arc<dyn CacheAccess<T>>, ttl: impl TtlStrategy<T> + 'static) -> Self {
        Self {
            provider,
            ttl: Arc::new(ttl),
            key_fn: None,
        }
    }

    /// Derives cache keys from the context with `key_fn` instead.
    pub fn with_key_strategy(
        mut self,
        key_fn: impl Fn(&Context) -> String + Send + Sync + 'static,
    ) -> Self {
        self.key_fn = Some(Arc::new(key_fn));
        self
    }

    pub fn provider(&self) -> &Arc<dyn CacheAccess<T>> {
        &self.provider
    }

    fn cache_key(&self, context: &Context) -> String {
        match &self.key_fn {
            Some(key_fn) => key_fn(context),
            None => context.operation_key().to_string(),
        }
    }

    // == Execute ==
    /// Runs `operation` through the cache.
    ///
    /// An empty cache key bypasses the cache entirely. A zero TTL skips the
    /// write. Errors from `operation` are returned as-is and never cached.
    pub fn execute<E, F>(&self, context: &Context, operation: F) -> Result<T, E>
    where
        F: FnOnce(&Context) -> Result<T, E>,
    {
        let key = self.cache_key(context);
        if key.is_empty() {
            return operation(context);
        }

        match self.provider.get(&key) {
            Ok(Some(value)) => {
                debug!("Cache hit for '{}'", key);
                return Ok(value);
            }
            Ok(None) => debug!("Cache miss for '{}'", key),
            Err(err) => warn!("Cache read for '{}' failed, executing anyway: {}", key, err),
        }

        let value = operation(context)?;

        let ttl = self.ttl.get_ttl(context, Some(&value));
        if ttl.is_zero() {
            debug!("Zero TTL for '{}', result not cached", key);
        } else if let Err(err) = self.provider.put(&key, Some(&value), &ttl) {
            warn!("Cache write for '{}' failed: {}", key, err);
        }
        Ok(value)
    }

    // == Execute Async ==
    /// Async counterpart of [`execute`](Self::execute).
    ///
    /// Cancellation is checked first and surfaces as [`CacheError::Cancelled`],
    /// as does a cancelled cache read. A write cancelled after the operation
    /// ran is dropped like any other write failure.
    pub async fn execute_async<E, F, Fut>(
        &self,
        context: &Context,
        cancel: &CancellationToken,
        preserve_context: bool,
        operation: F,
    ) -> Result<T, E>
    where
        E: From<CacheError>,
        F: FnOnce(Context) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if cancel.is_cancelled() {
            return Err(CacheError::Cancelled.into());
        }

        let key = self.cache_key(context);
        if key.is_empty() {
            return operation(context.clone()).await;
        }

        match self.provider.get_async(&key, cancel, preserve_context).await {
            Ok(Some(value)) => {
                debug!("Cache hit for '{}'", key);
                return Ok(value);
            }
            Ok(None) => debug!("Cache miss for '{}'", key),
            Err(CacheError::Cancelled) => return Err(CacheError::Cancelled.into()),
            Err(err) => warn!("Cache read for '{}' failed, executing anyway: {}", key, err),
        }

        let value = operation(context.clone()).await?;

        let ttl = self.ttl.get_ttl(context, Some(&value));
        if ttl.is_zero() {
            debug!("Zero TTL for '{}', result not cached", key);
        } else if let Err(err) = self
            .provider
            .put_async(&key, Some(&value), &ttl, cancel, preserve_context)
            .await
        {
            warn!("Cache write for '{}' failed: {}", key, err);
        }
        Ok(value)
    }
}
