use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, instrument, warn};

use claimtrack_core::{Aggregate, AggregateRoot, ExpectedVersion};
use claimtrack_inventory::{
    Committed, InventoryCommand, InventoryItem, InventoryItemId, InventoryRegistry, ItemIdentifier,
    RecordedEvent, RegistryError, normalize_serial,
};

#[derive(Debug, Default)]
struct Tables {
    items: HashMap<InventoryItemId, InventoryItem>,
    /// Normalized serial → item.
    serials: HashMap<String, InventoryItemId>,
    history: HashMap<InventoryItemId, Vec<RecordedEvent>>,
}

/// In-memory inventory registry.
///
/// One write lock covers version check, decision and write, which gives the
/// same guarantee as a conditional `UPDATE ... WHERE version = $n`.
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryInventoryRegistry {
    tables: RwLock<Tables>,
}

impl InMemoryInventoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, RegistryError> {
        Ok(self.read()?.items.len())
    }

    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, RegistryError> {
        self.tables
            .read()
            .map_err(|_| RegistryError::Storage("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, RegistryError> {
        self.tables
            .write()
            .map_err(|_| RegistryError::Storage("lock poisoned".to_string()))
    }
}

impl InventoryRegistry for InMemoryInventoryRegistry {
    fn find_by_identifier(&self, identifier: &ItemIdentifier) -> Result<InventoryItem, RegistryError> {
        let tables = self.read()?;

        if let Some(item) = identifier.as_item_id().and_then(|id| tables.items.get(&id)) {
            return Ok(item.clone());
        }

        tables
            .serials
            .get(identifier.normalized())
            .and_then(|id| tables.items.get(id))
            .cloned()
            .ok_or(RegistryError::NotFound)
    }

    fn get(&self, item_id: InventoryItemId) -> Result<InventoryItem, RegistryError> {
        self.read()?
            .items
            .get(&item_id)
            .cloned()
            .ok_or(RegistryError::NotFound)
    }

    #[instrument(skip(self, command), fields(item_id = %command.item_id()), err)]
    fn execute(
        &self,
        command: InventoryCommand,
        expected_version: ExpectedVersion,
    ) -> Result<Committed, RegistryError> {
        let item_id = command.item_id();
        let mut tables = self.write()?;

        let current = match (tables.items.get(&item_id), &command) {
            (Some(item), _) => item.clone(),
            (None, InventoryCommand::ProvisionItem(_)) => InventoryItem::empty(item_id),
            (None, _) => return Err(RegistryError::NotFound),
        };

        let actual = current.version();
        if !expected_version.matches(actual) {
            warn!(?expected_version, actual, "stale item version");
            return Err(RegistryError::VersionConflict {
                expected: expected_version,
                actual,
            });
        }

        if let InventoryCommand::ProvisionItem(cmd) = &command {
            if tables.serials.contains_key(&normalize_serial(&cmd.serial_number)) {
                return Err(RegistryError::DuplicateSerial(cmd.serial_number.trim().to_string()));
            }
        }

        let events = current.handle(&command)?;
        if events.is_empty() {
            debug!(version = actual, "command produced no changes");
            return Ok(Committed {
                item: current,
                events: Vec::new(),
            });
        }

        let mut item = current;
        let mut recorded = Vec::with_capacity(events.len());
        for event in events {
            item.apply(&event);
            recorded.push(RecordedEvent::new(item_id, item.version(), event));
        }

        if actual == 0 {
            tables.serials.insert(normalize_serial(item.serial_number()), item_id);
        }
        tables
            .history
            .entry(item_id)
            .or_default()
            .extend(recorded.iter().cloned());
        tables.items.insert(item_id, item.clone());

        debug!(version = item.version(), events = recorded.len(), "item committed");
        Ok(Committed { item, events: recorded })
    }

    fn history(&self, item_id: InventoryItemId) -> Result<Vec<RecordedEvent>, RegistryError> {
        let tables = self.read()?;
        if !tables.items.contains_key(&item_id) {
            return Err(RegistryError::NotFound);
        }
        Ok(tables.history.get(&item_id).cloned().unwrap_or_default())
    }
}
