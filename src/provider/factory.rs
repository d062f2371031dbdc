//! Provider Factory Module
//!
//! Selects the provider for a backing representation at configuration time.
//! Misconfiguration fails here, before the first cache access.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::provider::{CacheAccess, CacheProvider, CacheProviderExt};
use crate::representation::RepresentationKind;
use crate::serializer::{ItemSerializerExt, JsonSerializer, Utf8Serializer};
use crate::store::BackingStore;

// == Raw Cache Provider ==
/// A raw provider for one of the supported representations.
#[derive(Clone)]
pub enum RawCacheProvider {
    String(CacheProvider<String>),
    Bytes(CacheProvider<Vec<u8>>),
}

impl RawCacheProvider {
    pub fn kind(&self) -> RepresentationKind {
        match self {
            RawCacheProvider::String(_) => RepresentationKind::String,
            RawCacheProvider::Bytes(_) => RepresentationKind::Bytes,
        }
    }
}

/// Builds the raw provider for `kind` over `store`.
///
/// # Arguments
/// * `kind` - representation used to talk to the store
/// * `store` - backing store; `None` is a configuration error
pub fn raw_provider(
    kind: RepresentationKind,
    store: Option<Arc<dyn BackingStore>>,
) -> Result<RawCacheProvider> {
    let store = store.ok_or_else(|| {
        CacheError::Configuration("a backing store is required to build a cache provider".into())
    })?;

    debug!("Building {} cache provider", kind);
    Ok(match kind {
        RepresentationKind::String => RawCacheProvider::String(CacheProvider::new(store)),
        RepresentationKind::Bytes => RawCacheProvider::Bytes(CacheProvider::new(store)),
    })
}

/// Builds a provider of `T` values backed by the named representation.
///
/// Values are JSON encoded; over `bytes` the JSON text is additionally
/// UTF-8 encoded.
///
/// # Arguments
/// * `representation` - `string` or `bytes` (aliases `byte-array`, `byte[]`)
/// * `store` - backing store; `None` is a configuration error
///
/// # Errors
/// `UnsupportedRepresentation` naming the allowed set for any other name,
/// `Configuration` for a missing store.
pub fn for_result_type<T>(
    representation: &str,
    store: Option<Arc<dyn BackingStore>>,
) -> Result<Arc<dyn CacheAccess<T>>>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let kind: RepresentationKind = representation.parse()?;

    let provider: Arc<dyn CacheAccess<T>> = match raw_provider(kind, store)? {
        RawCacheProvider::String(raw) => Arc::new(raw.with_serializer(JsonSerializer::<T>::new())),
        RawCacheProvider::Bytes(raw) => {
            Arc::new(raw.with_serializer(JsonSerializer::<T>::new().then(Utf8Serializer)))
        }
    };

    debug!(
        "Cache provider for {} ready over {} representation",
        std::any::type_name::<T>(),
        kind
    );
    Ok(provider)
}

/// [`for_result_type`] with the representation taken from `config`.
pub fn from_config<T>(
    config: &Config,
    store: Option<Arc<dyn BackingStore>>,
) -> Result<Arc<dyn CacheAccess<T>>>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    for_result_type(&config.representation, store)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SyncCacheProvider;
    use crate::store::MemoryStore;
    use crate::ttl::Ttl;
    use std::time::Duration;

    fn memory() -> Option<Arc<dyn BackingStore>> {
        Some(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_raw_provider_dispatch() {
        let string = raw_provider(RepresentationKind::String, memory()).unwrap();
        let bytes = raw_provider(RepresentationKind::Bytes, memory()).unwrap();

        assert!(matches!(string, RawCacheProvider::String(_)));
        assert_eq!(bytes.kind(), RepresentationKind::Bytes);
    }

    #[test]
    fn test_raw_provider_requires_store() {
        let err = raw_provider(RepresentationKind::String, None).err().unwrap();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_for_result_type_rejects_unsupported_representation() {
        let err = for_result_type::<i32>("decimal", memory()).err().unwrap();

        assert!(err.is_configuration());
        let message = err.to_string();
        assert!(message.contains("decimal"));
        assert!(message.contains("string, bytes"));
    }

    #[test]
    fn test_for_result_type_rejects_before_touching_store() {
        // An unsupported name fails even without a store
        let err = for_result_type::<i32>("xml", None).err().unwrap();
        assert!(matches!(err, CacheError::UnsupportedRepresentation { .. }));
    }

    #[test]
    fn test_for_result_type_string_layout() {
        let store = Arc::new(MemoryStore::new());
        let provider = for_result_type::<Vec<String>>("string", Some(store.clone())).unwrap();

        provider
            .put("names", Some(&vec!["a".to_string()]), &Ttl::relative(Duration::from_secs(5)))
            .unwrap();

        assert_eq!(store.get("names"), Some(br#"["a"]"#.to_vec()));
    }

    #[test]
    fn test_from_config_uses_configured_representation() {
        let store = Arc::new(MemoryStore::new());
        let config = Config {
            representation: "byte[]".to_string(),
            ..Config::default()
        };
        let provider = from_config::<u32>(&config, Some(store.clone())).unwrap();

        provider
            .put("n", Some(&7), &Ttl::relative(Duration::from_secs(5)))
            .unwrap();

        assert_eq!(provider.get("n").unwrap(), Some(7));
        assert_eq!(store.get("n"), Some(b"7".to_vec()));
    }
}
