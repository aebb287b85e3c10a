//! Service wiring shared by all handlers.

use std::sync::Arc;

use claimtrack_claims::{BulkClaimProcessor, OwnershipClaimCoordinator};
use claimtrack_events::{EventBus, EventEnvelope, InMemoryEventBus};
use claimtrack_infra::{InMemoryInventoryRegistry, InMemoryOwnerDirectory, PublishingInventoryRegistry};
use claimtrack_inventory::InventoryEvent;

pub type AppBus = Arc<InMemoryEventBus<EventEnvelope<InventoryEvent>>>;
pub type AppRegistry = PublishingInventoryRegistry<InMemoryInventoryRegistry, AppBus>;
pub type AppCoordinator = OwnershipClaimCoordinator<Arc<AppRegistry>, Arc<InMemoryOwnerDirectory>>;

pub struct AppServices {
    pub bus: AppBus,
    pub registry: Arc<AppRegistry>,
    pub owners: Arc<InMemoryOwnerDirectory>,
    pub coordinator: Arc<AppCoordinator>,
    pub bulk: BulkClaimProcessor<Arc<AppRegistry>, Arc<InMemoryOwnerDirectory>>,
}

/// In-memory wiring: registry → bus, plus an audit subscriber that logs
/// every committed inventory event.
pub fn build_services() -> AppServices {
    let bus: AppBus = Arc::new(InMemoryEventBus::new());
    spawn_audit_log(&bus);

    let registry = Arc::new(PublishingInventoryRegistry::new(
        InMemoryInventoryRegistry::new(),
        Arc::clone(&bus),
    ));
    let owners = Arc::new(InMemoryOwnerDirectory::new());
    let coordinator = Arc::new(OwnershipClaimCoordinator::new(
        Arc::clone(&registry),
        Arc::clone(&owners),
    ));
    let bulk = BulkClaimProcessor::new(Arc::clone(&coordinator));

    AppServices {
        bus,
        registry,
        owners,
        coordinator,
        bulk,
    }
}

fn spawn_audit_log(bus: &AppBus) {
    // Subscribe before returning so no committed event is missed.
    let sub = bus.subscribe();
    std::thread::spawn(move || {
        for env in sub {
            tracing::info!(
                event_id = %env.event_id(),
                item_id = %env.aggregate_id(),
                sequence_number = env.sequence_number(),
                event_type = env.event_type(),
                "inventory event committed"
            );
        }
    });
}
