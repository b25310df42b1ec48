//! # Store Lifecycle Scenarios
//!
//! Construction, disposal and independent stores sharing one bus.
//!
//! ## Contract Tested:
//!
//! 1. **Construction**: invalid options and closed transports fail creation
//! 2. **Disposal**: reads after close fail; the consumer is released
//! 3. **Isolation**: each store owns its subscription and cache
//! 4. **Point-to-point**: a send reaches exactly one store on the address

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        check_reference, config_address, create_store, new_bus, policy, reference_config,
        CONFIG_ADDRESS,
    };
    use eventbus_config_store::{
        await_non_empty, factory_for, ConfigError, ConfigStore, EventBusConfigStore,
        EventBusStoreOptions, LifecycleError, StoreError, TransportError, EVENT_BUS_STORE,
    };
    use serde_json::json;
    use shared_bus::{MessagePublisher, Payload};
    use shared_types::{Address, ConfigValue};
    use std::time::Duration;
    use tokio::time::sleep;

    // =============================================================================
    // CONSTRUCTION
    // =============================================================================

    #[tokio::test]
    async fn test_factory_by_name() {
        let bus = new_bus();
        let factory = factory_for(EVENT_BUS_STORE).expect("factory registered");

        let store = factory
            .create(bus.clone(), &json!({ "address": CONFIG_ADDRESS }))
            .unwrap();

        assert!(store.get_configuration().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_address_fails_creation() {
        let bus = new_bus();
        let factory = factory_for(EVENT_BUS_STORE).unwrap();

        let result = factory.create(bus.clone(), &json!({ "format": "json" }));

        assert!(matches!(
            result,
            Err(StoreError::Config(ConfigError::MissingAddress))
        ));
    }

    #[tokio::test]
    async fn test_address_with_surrounding_spaces_is_used_verbatim() {
        let bus = new_bus();
        let padded = create_store(&bus, "config ").unwrap();
        let leading = create_store(&bus, " config").unwrap();

        assert_eq!(bus.consumer_count(&Address::new("config ").unwrap()), 1);
        assert_eq!(bus.consumer_count(&Address::new(" config").unwrap()), 1);
        assert_eq!(bus.consumer_count(&config_address()), 0);

        let value = ConfigValue::empty().with("padded", true);
        bus.send(&Address::new("config ").unwrap(), Payload::Structured(value.clone()))
            .await;

        assert_eq!(await_non_empty(padded.as_ref(), &policy()).await.unwrap(), value);
        assert!(leading.get_configuration().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_address_fails_creation() {
        let bus = new_bus();

        let result = create_store(&bus, "");

        assert!(matches!(result, Err(StoreError::Config(_))));
        assert_eq!(bus.total_consumers(), 0);
    }

    #[tokio::test]
    async fn test_closed_bus_fails_creation() {
        let bus = new_bus();
        bus.close();

        let result = create_store(&bus, CONFIG_ADDRESS);

        assert!(matches!(
            result,
            Err(StoreError::Transport(TransportError::Closed))
        ));
        assert_eq!(bus.total_consumers(), 0);
    }

    // =============================================================================
    // DISPOSAL
    // =============================================================================

    #[tokio::test]
    async fn test_close_then_read() {
        let bus = new_bus();
        let store = create_store(&bus, CONFIG_ADDRESS).unwrap();

        store.close().await.unwrap();

        assert_eq!(bus.consumer_count(&config_address()), 0);
        assert_eq!(
            store.get_configuration().await,
            Err(StoreError::Lifecycle(LifecycleError::Disposed))
        );
        assert_eq!(
            store.get_raw().await,
            Err(StoreError::Lifecycle(LifecycleError::Disposed))
        );
    }

    #[tokio::test]
    async fn test_closed_store_misses_later_messages() {
        let bus = new_bus();
        let closed = create_store(&bus, CONFIG_ADDRESS).unwrap();
        let open = create_store(&bus, CONFIG_ADDRESS).unwrap();
        closed.close().await.unwrap();

        let receivers = bus
            .publish(&config_address(), Payload::Structured(reference_config()))
            .await;

        assert_eq!(receivers, 1);
        check_reference(&await_non_empty(open.as_ref(), &policy()).await.unwrap());
    }

    #[tokio::test]
    async fn test_listener_cannot_resubscribe_after_close() {
        let bus = new_bus();
        let options = EventBusStoreOptions::new(config_address());
        let store = EventBusConfigStore::new(bus.clone(), options).unwrap();

        assert!(matches!(
            store.listener().subscribe(),
            Err(StoreError::Lifecycle(LifecycleError::AlreadySubscribed { .. }))
        ));

        store.close().await.unwrap();

        assert!(matches!(
            store.listener().subscribe(),
            Err(StoreError::Lifecycle(LifecycleError::Disposed))
        ));
        assert_eq!(bus.consumer_count(&config_address()), 0);
    }

    // =============================================================================
    // ISOLATION
    // =============================================================================

    #[tokio::test]
    async fn test_stores_on_different_addresses() {
        let bus = new_bus();
        let a = create_store(&bus, "config.a").unwrap();
        let b = create_store(&bus, "config.b").unwrap();

        let value_a = ConfigValue::empty().with("store", "a");
        bus.send(&Address::new("config.a").unwrap(), Payload::Structured(value_a.clone()))
            .await;

        assert_eq!(await_non_empty(a.as_ref(), &policy()).await.unwrap(), value_a);
        sleep(Duration::from_millis(20)).await;
        assert!(b.get_configuration().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_late_store_misses_earlier_publish() {
        let bus = new_bus();
        let early = create_store(&bus, CONFIG_ADDRESS).unwrap();

        bus.publish(&config_address(), Payload::Structured(reference_config()))
            .await;
        await_non_empty(early.as_ref(), &policy()).await.unwrap();

        let late = create_store(&bus, CONFIG_ADDRESS).unwrap();
        sleep(Duration::from_millis(20)).await;
        assert!(late.get_configuration().await.unwrap().is_empty());
    }

    // =============================================================================
    // POINT-TO-POINT
    // =============================================================================

    #[tokio::test]
    async fn test_send_reaches_exactly_one_store() {
        let bus = new_bus();
        let first = create_store(&bus, CONFIG_ADDRESS).unwrap();
        let second = create_store(&bus, CONFIG_ADDRESS).unwrap();

        let delivered = bus
            .send(&config_address(), Payload::Structured(reference_config()))
            .await;
        assert_eq!(delivered, 1);

        // Poll both; exactly one converges.
        let mut populated = 0;
        for _ in 0..200 {
            populated = 0;
            for store in [&first, &second] {
                if !store.get_configuration().await.unwrap().is_empty() {
                    populated += 1;
                }
            }
            if populated > 0 {
                break;
            }
            sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(populated, 1);

        sleep(Duration::from_millis(20)).await;
        let mut still_populated = 0;
        for store in [&first, &second] {
            if !store.get_configuration().await.unwrap().is_empty() {
                still_populated += 1;
            }
        }
        assert_eq!(still_populated, 1);
    }
}
