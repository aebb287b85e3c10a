use thiserror::Error;

use claimtrack_core::DomainError;
use claimtrack_inventory::RegistryError;

/// Failure of a claim-side operation.
///
/// Business outcomes such as "owned by someone else" are not errors; they are
/// reported through `ClaimOutcome` / `BulkClaimReport`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimError {
    /// Malformed input, rejected before any registry access.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("item not found")]
    NotFound,

    /// Concurrent writers kept moving the item's version; the caller may retry.
    #[error("item '{identifier}' changed concurrently; retry the request")]
    TransientConflict { identifier: String },

    #[error("caller is not the owner of the item")]
    NotOwner,

    /// The item's lifecycle state does not allow the operation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Registry(RegistryError),
}

impl From<RegistryError> for ClaimError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::NotFound => ClaimError::NotFound,
            RegistryError::NotOwner => ClaimError::NotOwner,
            RegistryError::Validation(msg) => ClaimError::Validation(msg),
            RegistryError::InvalidTransition(msg) => ClaimError::InvalidState(msg),
            other => ClaimError::Registry(other),
        }
    }
}

impl From<DomainError> for ClaimError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => ClaimError::Validation(msg),
            DomainError::NotFound => ClaimError::NotFound,
            DomainError::NotOwner => ClaimError::NotOwner,
            DomainError::InvariantViolation(msg) | DomainError::Conflict(msg) => {
                ClaimError::InvalidState(msg)
            }
        }
    }
}
