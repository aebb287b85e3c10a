use tracing::warn;

use claimtrack_core::ExpectedVersion;
use claimtrack_events::{EventBus, EventEnvelope};
use claimtrack_inventory::{
    Committed, InventoryCommand, InventoryEvent, InventoryItem, InventoryItemId, InventoryRegistry,
    ItemIdentifier, RecordedEvent, RegistryError,
};

/// Adapter that publishes committed events to an `EventBus` after a
/// successful write.
///
/// Publishing happens only after the conditional write succeeds. A publish
/// failure is logged and does not undo the write; subscribers can catch up
/// from `history`.
#[derive(Debug)]
pub struct PublishingInventoryRegistry<S, B> {
    registry: S,
    bus: B,
}

impl<S, B> PublishingInventoryRegistry<S, B> {
    pub fn new(registry: S, bus: B) -> Self {
        Self { registry, bus }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn inner(&self) -> &S {
        &self.registry
    }

    pub fn into_parts(self) -> (S, B) {
        (self.registry, self.bus)
    }
}

impl<S, B> InventoryRegistry for PublishingInventoryRegistry<S, B>
where
    S: InventoryRegistry,
    B: EventBus<EventEnvelope<InventoryEvent>>,
{
    fn find_by_identifier(&self, identifier: &ItemIdentifier) -> Result<InventoryItem, RegistryError> {
        self.registry.find_by_identifier(identifier)
    }

    fn get(&self, item_id: InventoryItemId) -> Result<InventoryItem, RegistryError> {
        self.registry.get(item_id)
    }

    fn execute(
        &self,
        command: InventoryCommand,
        expected_version: ExpectedVersion,
    ) -> Result<Committed, RegistryError> {
        let committed = self.registry.execute(command, expected_version)?;

        for event in &committed.events {
            if let Err(err) = self.bus.publish(event.to_envelope()) {
                warn!(
                    item_id = %event.item_id,
                    sequence_number = event.sequence_number,
                    error = ?err,
                    "failed to publish committed event"
                );
            }
        }

        Ok(committed)
    }

    fn history(&self, item_id: InventoryItemId) -> Result<Vec<RecordedEvent>, RegistryError> {
        self.registry.history(item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;
    use claimtrack_core::{AggregateId, ProductId};
    use claimtrack_events::{InMemoryEventBus, Subscription};
    use claimtrack_inventory::ProductSummary;
    use claimtrack_warranty::WarrantyPlan;

    use crate::registry::InMemoryInventoryRegistry;

    /// Bus whose publish always fails.
    struct BrokenBus;

    impl EventBus<EventEnvelope<InventoryEvent>> for BrokenBus {
        type Error = &'static str;

        fn publish(&self, _: EventEnvelope<InventoryEvent>) -> Result<(), Self::Error> {
            Err("broker unavailable")
        }

        fn subscribe(&self) -> Subscription<EventEnvelope<InventoryEvent>> {
            let (_tx, rx) = std::sync::mpsc::channel();
            Subscription::new(rx)
        }
    }

    fn product() -> ProductSummary {
        ProductSummary {
            product_id: ProductId::new(),
            name: "Router".to_string(),
            warranty: WarrantyPlan::NoWarranty,
        }
    }

    #[test]
    fn committed_events_are_published_in_order() {
        let bus = Arc::new(InMemoryEventBus::new());
        let sub = bus.subscribe();
        let registry = PublishingInventoryRegistry::new(InMemoryInventoryRegistry::new(), Arc::clone(&bus));

        let item_id = InventoryItemId::new(AggregateId::new());
        registry.provision(item_id, "RT-1", product(), Utc::now()).unwrap();

        let published = sub.drain();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].aggregate_id(), item_id.0);
        assert_eq!(published[0].sequence_number(), 1);
        assert_eq!(published[0].aggregate_type(), "inventory.item");
    }

    #[test]
    fn failed_writes_publish_nothing() {
        let bus = Arc::new(InMemoryEventBus::new());
        let sub = bus.subscribe();
        let registry = PublishingInventoryRegistry::new(InMemoryInventoryRegistry::new(), Arc::clone(&bus));

        registry
            .provision(InventoryItemId::new(AggregateId::new()), "RT-1", product(), Utc::now())
            .unwrap();
        sub.drain();

        let dup = registry.provision(InventoryItemId::new(AggregateId::new()), "rt-1", product(), Utc::now());
        assert!(dup.is_err());
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn publish_failure_keeps_the_write() {
        let registry = PublishingInventoryRegistry::new(InMemoryInventoryRegistry::new(), BrokenBus);
        let item_id = InventoryItemId::new(AggregateId::new());

        let item = registry.provision(item_id, "RT-2", product(), Utc::now()).unwrap();
        assert_eq!(registry.get(item_id).unwrap(), item);
    }
}
