//! Inventory domain module.
//!
//! Business rules for individual manufactured units: provisioning, the
//! in-stock → owned lifecycle and owner-only edits. The aggregate is pure;
//! `registry` defines the storage contract adapters implement.

pub mod identifier;
pub mod item;
pub mod registry;

pub use identifier::{ItemIdentifier, normalize_serial};
pub use item::{
    Acquisition, AnchorWarranty, ClaimOwnership, DisplayNameChanged, InventoryCommand,
    InventoryEvent, InventoryItem, InventoryItemId, ItemProvisioned, ItemState, MAX_DISPLAY_NAME_LEN,
    OwnershipClaimed,
    OwnershipReleased, ProductSummary, ProvisionItem, ReleaseOwnership, RenameItem,
    WarrantyAnchored,
};
pub use registry::{Committed, InventoryRegistry, OwnershipTransfer, RecordedEvent, RegistryError};
