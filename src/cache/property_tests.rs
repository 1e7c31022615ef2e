//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check key normalization and the get/set contract.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::cache::{cache_key, CacheStore, ManualClock};

// == Test Configuration ==
const TEST_TTL: u64 = 600;

// == Strategies ==
/// Parameter mappings with unique names, as a query string would carry them
fn params_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("[a-z]{1,8}", "[a-zA-Z0-9.-]{0,12}", 0..8)
        .prop_map(|map: BTreeMap<String, String>| map.into_iter().collect())
}

fn endpoint_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("weather".to_string()), Just("forecast".to_string())]
}

/// Arbitrary JSON documents a few levels deep
fn payload_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any permutation of the same pairs yields the same key.
    #[test]
    fn prop_key_ignores_parameter_order(
        endpoint in endpoint_strategy(),
        (params, shuffled) in params_strategy()
            .prop_flat_map(|p| (Just(p.clone()), Just(p).prop_shuffle())),
    ) {
        prop_assert_eq!(cache_key(&endpoint, &params), cache_key(&endpoint, &shuffled));
    }

    // Keys list parameters in ascending name order behind the endpoint prefix.
    #[test]
    fn prop_key_format(endpoint in endpoint_strategy(), params in params_strategy()) {
        let key = cache_key(&endpoint, &params);
        let prefix = format!("{}?", endpoint);
        prop_assert!(key.starts_with(&prefix));

        let query = &key[prefix.len()..];
        let expected = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        // params_strategy yields pairs already sorted by name
        prop_assert_eq!(query, expected.as_str());
    }

    // A payload read back before expiry is the payload that was stored.
    #[test]
    fn prop_set_then_get_roundtrip(
        endpoint in endpoint_strategy(),
        params in params_strategy(),
        payload in payload_strategy(),
    ) {
        let mut store = CacheStore::new(TEST_TTL);
        store.set(&endpoint, &params, payload.clone());
        prop_assert_eq!(store.get(&endpoint, &params), Some(payload));
    }

    // Nothing is returned for a key that was never written.
    #[test]
    fn prop_get_unset_is_absent(
        params in params_strategy(),
        other in params_strategy(),
    ) {
        prop_assume!(cache_key("weather", &params) != cache_key("weather", &other));

        let mut store = CacheStore::new(TEST_TTL);
        store.set("weather", &params, json!({"cached": true}));
        prop_assert_eq!(store.get("weather", &other), None);
    }

    // Entries disappear exactly when their TTL has elapsed.
    #[test]
    fn prop_entries_expire_after_ttl(
        ttl in 1u64..3600,
        elapsed in 0u64..7200,
        params in params_strategy(),
    ) {
        let clock = Arc::new(ManualClock::new(0));
        let mut store = CacheStore::with_clock(ttl, clock.clone());
        store.set("forecast", &params, json!([1, 2, 3]));

        clock.advance_secs(elapsed);
        let found = store.get("forecast", &params).is_some();
        prop_assert_eq!(found, elapsed < ttl);
    }

    // The last write for a key wins.
    #[test]
    fn prop_overwrite_semantics(
        params in params_strategy(),
        first in payload_strategy(),
        second in payload_strategy(),
    ) {
        let mut store = CacheStore::new(TEST_TTL);
        store.set("weather", &params, first);
        store.set("weather", &params, second.clone());

        prop_assert_eq!(store.get("weather", &params), Some(second));
        prop_assert_eq!(store.len(), 1);
    }

    // With a bound configured the store never grows past it.
    #[test]
    fn prop_bounded_store_respects_capacity(
        max in 1usize..10,
        cities in prop::collection::vec("[a-z]{1,6}", 0..40),
    ) {
        let mut store = CacheStore::new(TEST_TTL).with_max_entries(Some(max));
        for city in &cities {
            store.set("weather", &[("q", city.as_str())], json!(city));
            prop_assert!(store.len() <= max);
        }
    }
}
