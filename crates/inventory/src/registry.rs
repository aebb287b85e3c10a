//! Storage contract for inventory items.
//!
//! Every mutation is a conditional write keyed by the item's version token
//! (`ExpectedVersion`); there is no read-then-blind-write path. Adapters
//! implement [`InventoryRegistry::execute`] and the lookups; the named
//! lifecycle operations are provided on top of it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use claimtrack_core::{DomainError, ExpectedVersion, OwnerId};
use claimtrack_events::{Event, EventEnvelope};
use claimtrack_warranty::WarrantyPlan;

use crate::identifier::ItemIdentifier;
use crate::item::{
    Acquisition, AnchorWarranty, ClaimOwnership, InventoryCommand, InventoryEvent, InventoryItem,
    InventoryItemId, ProductSummary, ProvisionItem, ReleaseOwnership, RenameItem,
};

/// Stream name used for inventory item events.
pub const AGGREGATE_TYPE: &str = "inventory.item";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("item not found")]
    NotFound,

    /// The stored version moved since the caller read it.
    #[error("version conflict (expected {expected:?}, actual {actual})")]
    VersionConflict { expected: ExpectedVersion, actual: u64 },

    #[error("caller is not the owner of the item")]
    NotOwner,

    #[error("serial number '{0}' is already registered")]
    DuplicateSerial(String),

    #[error("validation failed: {0}")]
    Validation(String),

    /// The command is not valid for the item's current lifecycle state.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<DomainError> for RegistryError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => RegistryError::Validation(msg),
            DomainError::InvariantViolation(msg) | DomainError::Conflict(msg) => {
                RegistryError::InvalidTransition(msg)
            }
            DomainError::NotFound => RegistryError::NotFound,
            DomainError::NotOwner => RegistryError::NotOwner,
        }
    }
}

/// A committed event with its position in the item's stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub event_id: Uuid,
    pub item_id: InventoryItemId,
    /// Item version reached by applying this event.
    pub sequence_number: u64,
    pub event_type: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: InventoryEvent,
}

impl RecordedEvent {
    pub fn new(item_id: InventoryItemId, sequence_number: u64, payload: InventoryEvent) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            item_id,
            sequence_number,
            event_type: payload.event_type().to_string(),
            occurred_at: payload.occurred_at(),
            payload,
        }
    }

    pub fn to_envelope(&self) -> EventEnvelope<InventoryEvent> {
        EventEnvelope::new(
            self.event_id,
            self.item_id.0,
            AGGREGATE_TYPE,
            self.sequence_number,
            self.payload.clone(),
        )
    }
}

/// Result of a successful conditional write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    /// Item state after the write; `item.version()` is the new version token.
    pub item: InventoryItem,
    /// Events appended by the write (empty for no-op commands).
    pub events: Vec<RecordedEvent>,
}

/// Everything needed to move an in-stock item to an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipTransfer {
    pub item_id: InventoryItemId,
    pub owner: OwnerId,
    pub display_name: String,
    pub acquisition: Acquisition,
    pub sale_date: Option<NaiveDate>,
    pub warranty_plan: WarrantyPlan,
    pub warranty_anchor_date: Option<NaiveDate>,
    pub warranty_expires_on: Option<NaiveDate>,
    pub registered_on: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Inventory storage boundary.
///
/// Implementations must make `execute` atomic per item: the version check,
/// the decision and the write happen under one critical section (or one
/// conditional statement in a database).
pub trait InventoryRegistry: Send + Sync {
    /// Resolve an identifier against item ids and serial numbers.
    fn find_by_identifier(&self, identifier: &ItemIdentifier) -> Result<InventoryItem, RegistryError>;

    fn get(&self, item_id: InventoryItemId) -> Result<InventoryItem, RegistryError>;

    /// Apply a command if the stored version matches `expected_version`.
    fn execute(
        &self,
        command: InventoryCommand,
        expected_version: ExpectedVersion,
    ) -> Result<Committed, RegistryError>;

    /// Committed events for one item, in sequence order.
    fn history(&self, item_id: InventoryItemId) -> Result<Vec<RecordedEvent>, RegistryError>;

    fn provision(
        &self,
        item_id: InventoryItemId,
        serial_number: &str,
        product: ProductSummary,
        occurred_at: DateTime<Utc>,
    ) -> Result<InventoryItem, RegistryError> {
        let command = InventoryCommand::ProvisionItem(ProvisionItem {
            item_id,
            serial_number: serial_number.to_string(),
            product,
            occurred_at,
        });
        Ok(self.execute(command, ExpectedVersion::Exact(0))?.item)
    }

    /// Only `InStock → Sold/Rented`; callers branch on existing ownership first.
    fn transition_to_owned(
        &self,
        transfer: OwnershipTransfer,
        expected_version: ExpectedVersion,
    ) -> Result<InventoryItem, RegistryError> {
        let command = InventoryCommand::ClaimOwnership(ClaimOwnership {
            item_id: transfer.item_id,
            owner: transfer.owner,
            display_name: transfer.display_name,
            acquisition: transfer.acquisition,
            sale_date: transfer.sale_date,
            warranty_plan: transfer.warranty_plan,
            warranty_anchor_date: transfer.warranty_anchor_date,
            warranty_expires_on: transfer.warranty_expires_on,
            registered_on: transfer.registered_on,
            occurred_at: transfer.occurred_at,
        });
        Ok(self.execute(command, expected_version)?.item)
    }

    fn update_display_name(
        &self,
        item_id: InventoryItemId,
        owner: OwnerId,
        display_name: &str,
        expected_version: ExpectedVersion,
        occurred_at: DateTime<Utc>,
    ) -> Result<InventoryItem, RegistryError> {
        let command = InventoryCommand::RenameItem(RenameItem {
            item_id,
            owner,
            display_name: display_name.to_string(),
            occurred_at,
        });
        Ok(self.execute(command, expected_version)?.item)
    }

    fn anchor_warranty(
        &self,
        item_id: InventoryItemId,
        owner: OwnerId,
        anchor_date: NaiveDate,
        expires_on: Option<NaiveDate>,
        expected_version: ExpectedVersion,
        occurred_at: DateTime<Utc>,
    ) -> Result<InventoryItem, RegistryError> {
        let command = InventoryCommand::AnchorWarranty(AnchorWarranty {
            item_id,
            owner,
            anchor_date,
            expires_on,
            occurred_at,
        });
        Ok(self.execute(command, expected_version)?.item)
    }

    /// Administrative release: clears the owner and returns the item to stock.
    fn release_ownership(
        &self,
        item_id: InventoryItemId,
        reason: Option<String>,
        expected_version: ExpectedVersion,
        occurred_at: DateTime<Utc>,
    ) -> Result<InventoryItem, RegistryError> {
        let command = InventoryCommand::ReleaseOwnership(ReleaseOwnership {
            item_id,
            reason,
            occurred_at,
        });
        Ok(self.execute(command, expected_version)?.item)
    }
}

impl<R> InventoryRegistry for std::sync::Arc<R>
where
    R: InventoryRegistry + ?Sized,
{
    fn find_by_identifier(&self, identifier: &ItemIdentifier) -> Result<InventoryItem, RegistryError> {
        (**self).find_by_identifier(identifier)
    }

    fn get(&self, item_id: InventoryItemId) -> Result<InventoryItem, RegistryError> {
        (**self).get(item_id)
    }

    fn execute(
        &self,
        command: InventoryCommand,
        expected_version: ExpectedVersion,
    ) -> Result<Committed, RegistryError> {
        (**self).execute(command, expected_version)
    }

    fn history(&self, item_id: InventoryItemId) -> Result<Vec<RecordedEvent>, RegistryError> {
        (**self).history(item_id)
    }
}
