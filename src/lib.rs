//! Cache Adapter - typed cache providers over byte/string backing stores
//!
//! Provides TTL strategies, composable item serializers, sync and async cache
//! providers with an empty-means-absent convention, a provider factory and a
//! cache-aside policy.

pub mod config;
pub mod context;
pub mod error;
pub mod policy;
pub mod provider;
pub mod representation;
pub mod serializer;
pub mod store;
pub mod tasks;
pub mod ttl;

pub use config::Config;
pub use context::Context;
pub use error::{CacheError, Result};
pub use policy::CachePolicy;
pub use provider::{
    for_result_type, from_config, raw_provider, AsyncCacheProvider, CacheAccess, CacheProvider,
    CacheProviderExt, RawCacheProvider, SerializingCacheProvider, SyncCacheProvider,
};
pub use representation::{Representation, RepresentationKind};
pub use serializer::{ItemSerializer, ItemSerializerExt, JsonSerializer, Utf8Serializer};
pub use store::{BackingStore, MemoryStore};
pub use tasks::spawn_cleanup_task;
pub use ttl::{ExpirationTtl, ResultTtl, StoreOptions, Ttl, TtlStrategy};
