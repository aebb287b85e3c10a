//! Infrastructure layer: storage adapters behind the domain contracts.
//!
//! The in-memory adapters are the reference implementations of
//! `InventoryRegistry` and `OwnerDirectory`; a database-backed registry must
//! provide the same compare-and-swap semantics on the item version.

pub mod owners;
pub mod registry;

pub use owners::InMemoryOwnerDirectory;
pub use registry::{InMemoryInventoryRegistry, PublishingInventoryRegistry};
