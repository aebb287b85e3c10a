//! `claimtrack-claims`: ownership claim rules.
//!
//! [`OwnershipClaimCoordinator`] enforces single ownership for one item at a
//! time on top of any [`claimtrack_inventory::InventoryRegistry`];
//! [`BulkClaimProcessor`] applies the same rule to a batch and partitions the
//! outcomes. Neither holds mutable state of its own.

pub mod bulk;
pub mod coordinator;
pub mod directory;
pub mod error;
pub mod request;

pub use bulk::{BulkClaimBatch, BulkClaimProcessor, BulkClaimReport, ConflictEntry, FailedEntry};
pub use coordinator::{ClaimOutcome, ClaimPreview, OwnershipClaimCoordinator, resolve_anchor_date};
pub use directory::{OwnerDirectory, OwnerProfile, UNKNOWN_OWNER_NAME};
pub use error::ClaimError;
pub use request::ClaimRequest;
