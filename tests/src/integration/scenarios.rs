//! # Store Visibility Scenarios
//!
//! A store listens on `"config"`. Producers send or publish the reference
//! document, structured or as UTF-8 bytes, and the store is polled until it
//! converges.
//!
//! ## Contract Tested:
//!
//! 1. **No message yet**: a fresh store reads as empty
//! 2. **Send visibility**: a point-to-point send eventually becomes visible
//! 3. **Publish visibility**: a broadcast eventually becomes visible; an
//!    immediate read may legitimately still be empty
//! 4. **Replace, not merge**: the second of two updates wins outright
//! 5. **Bad payloads**: an undecodable message leaves the value in place

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        check_reference, config_address, create_store, new_bus, policy, reference_config,
        CONFIG_ADDRESS, JSON,
    };
    use eventbus_config_store::{await_non_empty, await_value};
    use proptest::prelude::*;
    use shared_bus::{MessagePublisher, Payload};
    use shared_types::ConfigValue;
    use std::time::Duration;
    use tokio::time::sleep;

    // =============================================================================
    // NO MESSAGE YET
    // =============================================================================

    #[tokio::test]
    async fn test_fresh_store_reads_empty() {
        store_telemetry::init_test_logging();
        let bus = new_bus();
        let store = create_store(&bus, CONFIG_ADDRESS).unwrap();

        let config = store.get_configuration().await.unwrap();

        assert!(config.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_fresh_store_reads_empty_for_any_address(address in "[a-zA-Z0-9._/-]{1,40}") {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let config = runtime.block_on(async {
                let bus = new_bus();
                let store = create_store(&bus, &address).unwrap();
                store.get_configuration().await.unwrap()
            });
            prop_assert!(config.is_empty());
        }
    }

    // =============================================================================
    // SEND VISIBILITY
    // =============================================================================

    #[tokio::test]
    async fn test_with_send() {
        store_telemetry::init_test_logging();
        let bus = new_bus();
        let store = create_store(&bus, CONFIG_ADDRESS).unwrap();
        assert!(store.get_configuration().await.unwrap().is_empty());

        let delivered = bus
            .send(&config_address(), Payload::Structured(reference_config()))
            .await;
        assert_eq!(delivered, 1);

        let received = await_non_empty(store.as_ref(), &policy()).await.unwrap();
        check_reference(&received);
    }

    #[tokio::test]
    async fn test_with_send_with_buffer() {
        store_telemetry::init_test_logging();
        let bus = new_bus();
        let store = create_store(&bus, CONFIG_ADDRESS).unwrap();
        assert!(store.get_configuration().await.unwrap().is_empty());

        bus.send(&config_address(), Payload::Bytes(JSON.as_bytes().to_vec()))
            .await;

        let received = await_non_empty(store.as_ref(), &policy()).await.unwrap();
        check_reference(&received);
        assert_eq!(received, reference_config());
    }

    // =============================================================================
    // PUBLISH VISIBILITY
    // =============================================================================

    #[tokio::test]
    async fn test_with_publish() {
        store_telemetry::init_test_logging();
        let bus = new_bus();
        let store = create_store(&bus, CONFIG_ADDRESS).unwrap();
        assert!(store.get_configuration().await.unwrap().is_empty());

        bus.publish(&config_address(), Payload::Structured(reference_config()))
            .await;

        // An immediate read may still see the previous value; only
        // non-convergence within the bound is a failure.
        let immediate = store.get_configuration().await.unwrap();
        assert!(immediate.is_empty() || immediate == reference_config());

        let received = await_non_empty(store.as_ref(), &policy()).await.unwrap();
        check_reference(&received);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_publish_reaches_every_store() {
        let bus = new_bus();
        let stores: Vec<_> = (0..3)
            .map(|_| create_store(&bus, CONFIG_ADDRESS).unwrap())
            .collect();

        let receivers = bus
            .publish(&config_address(), Payload::Bytes(JSON.as_bytes().to_vec()))
            .await;
        assert_eq!(receivers, 3);

        let policy = policy();
        let results = futures::future::join_all(
            stores
                .iter()
                .map(|store| await_non_empty(store.as_ref(), &policy)),
        )
        .await;

        for result in results {
            check_reference(&result.unwrap());
        }
    }

    // =============================================================================
    // REPLACE, NOT MERGE
    // =============================================================================

    #[tokio::test]
    async fn test_second_send_replaces_first() {
        let bus = new_bus();
        let store = create_store(&bus, CONFIG_ADDRESS).unwrap();
        let first = ConfigValue::empty().with("first", true).with("shared", 1);
        let second = ConfigValue::empty().with("second", true).with("shared", 2);

        bus.send(&config_address(), Payload::Structured(first)).await;
        bus.send(&config_address(), Payload::Structured(second.clone()))
            .await;

        let converged = await_value(store.as_ref(), &policy(), &second)
            .await
            .unwrap();
        assert!(converged.get("first").is_none());

        // Once the second value is visible the first never reappears.
        for _ in 0..20 {
            assert_eq!(store.get_configuration().await.unwrap(), second);
            sleep(Duration::from_millis(1)).await;
        }
    }

    #[tokio::test]
    async fn test_published_empty_object_clears() {
        let bus = new_bus();
        let store = create_store(&bus, CONFIG_ADDRESS).unwrap();

        bus.send(&config_address(), Payload::Structured(reference_config()))
            .await;
        await_non_empty(store.as_ref(), &policy()).await.unwrap();

        bus.publish(&config_address(), Payload::Bytes(b"{}".to_vec()))
            .await;
        let cleared = await_value(store.as_ref(), &policy(), &ConfigValue::empty())
            .await
            .unwrap();
        assert!(cleared.is_empty());
    }

    // =============================================================================
    // BAD PAYLOADS
    // =============================================================================

    #[tokio::test]
    async fn test_malformed_payload_keeps_previous_value() {
        store_telemetry::init_test_logging();
        let bus = new_bus();
        let store = create_store(&bus, CONFIG_ADDRESS).unwrap();

        bus.send(&config_address(), Payload::Structured(reference_config()))
            .await;
        await_non_empty(store.as_ref(), &policy()).await.unwrap();

        bus.send(&config_address(), Payload::Bytes(vec![0xFF, 0xFE, 0xFD]))
            .await;
        bus.send(&config_address(), Payload::Bytes(b"[1,2,3]".to_vec()))
            .await;

        // Both bad messages are dropped; the reference value stays in place.
        sleep(Duration::from_millis(20)).await;
        assert_eq!(store.get_configuration().await.unwrap(), reference_config());

        let marker = ConfigValue::empty().with("after", "bad");
        bus.send(&config_address(), Payload::Structured(marker.clone()))
            .await;

        // The listener survived both bad messages and applied the next one.
        let received = await_value(store.as_ref(), &policy(), &marker)
            .await
            .unwrap();
        assert_eq!(received, marker);
    }

    #[tokio::test]
    async fn test_malformed_payload_before_any_value_reads_empty() {
        let bus = new_bus();
        let store = create_store(&bus, CONFIG_ADDRESS).unwrap();

        bus.send(&config_address(), Payload::Bytes(b"{\"key\":".to_vec()))
            .await;
        sleep(Duration::from_millis(20)).await;

        assert!(store.get_configuration().await.unwrap().is_empty());
    }
}
