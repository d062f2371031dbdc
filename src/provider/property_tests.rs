//! Property-Based Tests for Cache Providers
//!
//! Uses proptest to check the hit/miss contract across both representations
//! and both execution paths.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::provider::{for_result_type, AsyncCacheProvider, CacheAccess, SyncCacheProvider};
use crate::store::{BackingStore, MemoryStore};
use crate::ttl::Ttl;

// == Strategies ==
/// Generates valid cache keys (non-empty, within length limit)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,64}".prop_map(|s| s)
}

fn representation_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("string"), Just("bytes")]
}

/// Cache operations against a provider of optional text
#[derive(Debug, Clone)]
enum ProviderOp {
    Put { key: String, value: Option<String> },
    Get { key: String },
}

fn provider_op_strategy() -> impl Strategy<Value = ProviderOp> {
    prop_oneof![
        (valid_key_strategy(), prop::option::of(".{0,32}"))
            .prop_map(|(key, value)| ProviderOp::Put { key, value }),
        valid_key_strategy().prop_map(|key| ProviderOp::Get { key }),
    ]
}

fn provider_for<T>(representation: &str) -> Arc<dyn CacheAccess<T>>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync + 'static,
{
    let store: Arc<dyn BackingStore> = Arc::new(MemoryStore::new());
    for_result_type::<T>(representation, Some(store)).unwrap()
}

fn ttl() -> Ttl {
    Ttl::relative(Duration::from_secs(600))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // A stored value reads back equal, under either representation
    #[test]
    fn prop_round_trip(
        representation in representation_strategy(),
        key in valid_key_strategy(),
        value in ".{0,64}",
    ) {
        let provider = provider_for::<String>(representation);

        provider.put(&key, Some(&value), &ttl()).unwrap();

        prop_assert_eq!(provider.try_get(&key).unwrap(), (true, value));
    }

    // Sync and async paths agree on what is stored
    #[test]
    fn prop_sync_and_async_agree(
        representation in representation_strategy(),
        key in valid_key_strategy(),
        value in prop::collection::vec(any::<i64>(), 0..16),
    ) {
        let provider = provider_for::<Vec<i64>>(representation);
        let cancel = CancellationToken::new();

        tokio_test::block_on(provider.put_async(&key, Some(&value), &ttl(), &cancel, false))
            .unwrap();
        prop_assert_eq!(provider.get(&key).unwrap(), Some(value.clone()));

        let next: Vec<i64> = value.iter().map(|v| v.wrapping_add(1)).collect();
        provider.put(&key, Some(&next), &ttl()).unwrap();
        let read = tokio_test::block_on(provider.get_async(&key, &cancel, true)).unwrap();
        prop_assert_eq!(read, Some(next));
    }

    // The last put wins; a `None` put turns the key into a miss
    #[test]
    fn prop_last_write_wins(
        representation in representation_strategy(),
        ops in prop::collection::vec(provider_op_strategy(), 1..50),
    ) {
        let provider = provider_for::<String>(representation);
        let mut expected: HashMap<String, Option<String>> = HashMap::new();

        for op in ops {
            match op {
                ProviderOp::Put { key, value } => {
                    provider.put(&key, value.as_ref(), &ttl()).unwrap();
                    expected.insert(key, value);
                }
                ProviderOp::Get { key } => {
                    let want = expected.get(&key).cloned().flatten();
                    prop_assert_eq!(provider.get(&key).unwrap(), want);
                }
            }
        }
    }

    // Keys never written are misses that yield the default value
    #[test]
    fn prop_unknown_key_is_miss(
        representation in representation_strategy(),
        key in valid_key_strategy(),
    ) {
        let provider = provider_for::<u64>(representation);

        prop_assert_eq!(provider.try_get(&key).unwrap(), (false, 0));
    }
}
