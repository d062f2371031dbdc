//! Serializing Provider Module
//!
//! Wraps a provider of representation `R` so callers work with values of `T`.

use std::marker::PhantomData;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::context::Context;
use crate::error::Result;
use crate::provider::{ensure_not_cancelled, AsyncCacheProvider, SyncCacheProvider};
use crate::representation::Representation;
use crate::serializer::{deserialize_item, serialize_item, ItemSerializer};
use crate::ttl::{Ttl, TtlStrategy};

// == Serializing Cache Provider ==
/// Provider of `T` values layered over a provider of `R` values.
///
/// Reads deserialize what the inner provider returns; writes serialize first.
/// `None` maps to the empty representation in both directions.
pub struct SerializingCacheProvider<T, R, P, S> {
    inner: P,
    serializer: S,
    _marker: PhantomData<fn() -> (T, R)>,
}

impl<T, R, P, S> SerializingCacheProvider<T, R, P, S>
where
    R: Representation,
    S: ItemSerializer<T, R>,
{
    pub fn new(inner: P, serializer: S) -> Self {
        Self {
            inner,
            serializer,
            _marker: PhantomData,
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    fn decode(&self, raw: Option<R>) -> Result<Option<T>> {
        match raw {
            Some(raw) => deserialize_item(&self.serializer, raw),
            None => Ok(None),
        }
    }

    /// The TTL is resolved against the caller's value before serialization,
    /// so value-dependent strategies see `T` rather than its representation.
    fn encode(&self, key: &str, value: Option<&T>, ttl: &dyn TtlStrategy<T>) -> Result<(R, Ttl)> {
        let resolved = ttl.get_ttl(&Context::new(key), value);
        let raw = serialize_item(&self.serializer, value)?;
        Ok((raw, resolved))
    }
}

impl<T, R, P, S> SyncCacheProvider<T> for SerializingCacheProvider<T, R, P, S>
where
    R: Representation,
    P: SyncCacheProvider<R>,
    S: ItemSerializer<T, R>,
{
    fn get(&self, key: &str) -> Result<Option<T>> {
        let raw = self.inner.get(key)?;
        self.decode(raw)
    }

    fn put(&self, key: &str, value: Option<&T>, ttl: &dyn TtlStrategy<T>) -> Result<()> {
        let (raw, resolved) = self.encode(key, value, ttl)?;
        self.inner.put(key, Some(&raw), &resolved)
    }
}

#[async_trait]
impl<T, R, P, S> AsyncCacheProvider<T> for SerializingCacheProvider<T, R, P, S>
where
    T: Send + Sync,
    R: Representation,
    P: AsyncCacheProvider<R>,
    S: ItemSerializer<T, R>,
{
    async fn get_async(
        &self,
        key: &str,
        cancel: &CancellationToken,
        preserve_context: bool,
    ) -> Result<Option<T>> {
        ensure_not_cancelled(cancel)?;
        let raw = self.inner.get_async(key, cancel, preserve_context).await?;
        self.decode(raw)
    }

    async fn put_async(
        &self,
        key: &str,
        value: Option<&T>,
        ttl: &dyn TtlStrategy<T>,
        cancel: &CancellationToken,
        preserve_context: bool,
    ) -> Result<()> {
        ensure_not_cancelled(cancel)?;
        let (raw, resolved) = self.encode(key, value, ttl)?;
        self.inner
            .put_async(key, Some(&raw), &resolved, cancel, preserve_context)
            .await
    }
}

// == Provider Extension ==
/// Adds [`with_serializer`](CacheProviderExt::with_serializer) to every
/// provider of a representation type.
pub trait CacheProviderExt<R>: SyncCacheProvider<R> + Sized {
    /// Layers `serializer` over this provider.
    ///
    /// # Arguments
    /// * `serializer` - converts between caller values and `R`
    fn with_serializer<T, S>(self, serializer: S) -> SerializingCacheProvider<T, R, Self, S>
    where
        R: Representation,
        S: ItemSerializer<T, R>,
    {
        SerializingCacheProvider::new(self, serializer)
    }
}

impl<R, P: SyncCacheProvider<R>> CacheProviderExt<R> for P {}
