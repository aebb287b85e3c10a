//! Single-item ownership claims.
//!
//! ```text
//! resolve item ──absent──────────────▶ NotFound
//!      │
//!      ├─ unowned ──▶ transition_to_owned(v) ──ok──▶ Registered
//!      │                      │
//!      │                 VersionConflict ──▶ resolve again (once) ──▶ TransientConflict
//!      ├─ owned by requester ──▶ update_display_name ──▶ AlreadyOwnedBySameOwner
//!      └─ owned by other ─────────────────────────────▶ ConflictOtherOwner
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, instrument, warn};

use claimtrack_core::{AggregateRoot, ExpectedVersion, OwnerId};
use claimtrack_inventory::{
    InventoryItem, InventoryRegistry, ItemIdentifier, OwnershipTransfer, RegistryError,
};
use claimtrack_warranty::{WarrantyAnchor, WarrantyPlan, compute_expiration};

use crate::directory::OwnerDirectory;
use crate::error::ClaimError;
use crate::request::{ClaimRequest, validate_display_name};

/// Result of evaluating one claim against one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    NotFound,
    ConflictOtherOwner { current_owner: OwnerId },
    Registered(InventoryItem),
    AlreadyOwnedBySameOwner(InventoryItem),
}

impl ClaimOutcome {
    pub fn item(&self) -> Option<&InventoryItem> {
        match self {
            ClaimOutcome::Registered(item) | ClaimOutcome::AlreadyOwnedBySameOwner(item) => Some(item),
            ClaimOutcome::NotFound | ClaimOutcome::ConflictOtherOwner { .. } => None,
        }
    }
}

/// Read-only preview of what `claim` would do for the requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimPreview {
    pub item: Option<InventoryItem>,
    /// Redacted name of the blocking owner, when another owner holds the item.
    pub other_owner_name: Option<String>,
    pub already_owned_by_self: bool,
}

impl ClaimPreview {
    pub fn found(&self) -> bool {
        self.item.is_some()
    }

    pub fn conflict_other_owner(&self) -> bool {
        self.other_owner_name.is_some()
    }
}

/// Warranty anchor for a first claim.
///
/// Only a purchase plan falls back to the claim day. Every other anchored
/// plan uses the sale date, so registration without one stays open, and an
/// installation plan stays open until installation is recorded.
pub fn resolve_anchor_date(
    plan: &WarrantyPlan,
    sale_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    match plan.anchor()? {
        WarrantyAnchor::Purchase => Some(sale_date.unwrap_or(today)),
        WarrantyAnchor::Registration | WarrantyAnchor::Installation => sale_date,
    }
}

enum Attempt {
    Done(ClaimOutcome),
    Stale,
}

/// Enforces "at most one live owner per item" on top of a registry.
#[derive(Debug)]
pub struct OwnershipClaimCoordinator<R, D> {
    registry: R,
    directory: D,
}

impl<R, D> OwnershipClaimCoordinator<R, D>
where
    R: InventoryRegistry,
    D: OwnerDirectory,
{
    pub fn new(registry: R, directory: D) -> Self {
        Self { registry, directory }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Claim one item for `request.owner`. First claim wins.
    #[instrument(
        skip(self, request),
        fields(identifier = %request.identifier, owner = %request.owner),
        err
    )]
    pub fn claim(&self, request: &ClaimRequest) -> Result<ClaimOutcome, ClaimError> {
        let identifier = request.validate()?;

        match self.attempt(&identifier, request)? {
            Attempt::Done(outcome) => Ok(outcome),
            Attempt::Stale => {
                warn!("version conflict while claiming; re-resolving once");
                match self.attempt(&identifier, request)? {
                    Attempt::Done(outcome) => Ok(outcome),
                    Attempt::Stale => Err(ClaimError::TransientConflict {
                        identifier: identifier.as_str().to_string(),
                    }),
                }
            }
        }
    }

    fn attempt(&self, identifier: &ItemIdentifier, request: &ClaimRequest) -> Result<Attempt, ClaimError> {
        let item = match self.registry.find_by_identifier(identifier) {
            Ok(item) => item,
            Err(RegistryError::NotFound) => {
                debug!("no item matches identifier");
                return Ok(Attempt::Done(ClaimOutcome::NotFound));
            }
            Err(e) => return Err(e.into()),
        };
        let expected = ExpectedVersion::Exact(item.version());

        match item.owner() {
            None => {
                let transfer = ownership_transfer(&item, request);
                match self.registry.transition_to_owned(transfer, expected) {
                    Ok(item) => {
                        info!(item_id = %item.id_typed(), version = item.version(), "item registered");
                        Ok(Attempt::Done(ClaimOutcome::Registered(item)))
                    }
                    Err(RegistryError::VersionConflict { .. }) => Ok(Attempt::Stale),
                    Err(e) => Err(e.into()),
                }
            }
            Some(owner) if owner == request.owner => {
                // Re-claim by the same owner only relabels; the warranty stays anchored.
                match self.registry.update_display_name(
                    item.id_typed(),
                    request.owner,
                    &request.display_name,
                    expected,
                    request.occurred_at,
                ) {
                    Ok(item) => {
                        debug!(item_id = %item.id_typed(), "item already owned by requester");
                        Ok(Attempt::Done(ClaimOutcome::AlreadyOwnedBySameOwner(item)))
                    }
                    Err(RegistryError::VersionConflict { .. }) => Err(ClaimError::TransientConflict {
                        identifier: identifier.as_str().to_string(),
                    }),
                    Err(e) => Err(e.into()),
                }
            }
            Some(current_owner) => {
                info!(item_id = %item.id_typed(), "item owned by another owner");
                Ok(Attempt::Done(ClaimOutcome::ConflictOtherOwner { current_owner }))
            }
        }
    }

    /// What `claim` would do, without writing anything.
    #[instrument(skip(self), err)]
    pub fn verify(&self, identifier: &str, requester: OwnerId) -> Result<ClaimPreview, ClaimError> {
        let identifier = ItemIdentifier::parse(identifier)?;

        let item = match self.registry.find_by_identifier(&identifier) {
            Ok(item) => item,
            Err(RegistryError::NotFound) => {
                return Ok(ClaimPreview {
                    item: None,
                    other_owner_name: None,
                    already_owned_by_self: false,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let (other_owner_name, already_owned_by_self) = match item.owner() {
            None => (None, false),
            Some(owner) if owner == requester => (None, true),
            Some(owner) => (Some(self.directory.public_name(owner)), false),
        };

        Ok(ClaimPreview {
            item: Some(item),
            other_owner_name,
            already_owned_by_self,
        })
    }

    /// Owner-only relabel of an item.
    #[instrument(skip(self, display_name), err)]
    pub fn rename(
        &self,
        owner: OwnerId,
        identifier: &str,
        display_name: &str,
        occurred_at: DateTime<Utc>,
    ) -> Result<InventoryItem, ClaimError> {
        let identifier = ItemIdentifier::parse(identifier)?;
        validate_display_name(display_name)?;

        let item = self.owned_item(&identifier, owner)?;
        self.registry
            .update_display_name(
                item.id_typed(),
                owner,
                display_name,
                ExpectedVersion::Exact(item.version()),
                occurred_at,
            )
            .map_err(|e| stale_as_transient(e, &identifier))
    }

    /// Anchor a warranty that was claimed before its anchor event happened.
    #[instrument(skip(self), err)]
    pub fn record_installation(
        &self,
        owner: OwnerId,
        identifier: &str,
        installed_on: NaiveDate,
        occurred_at: DateTime<Utc>,
    ) -> Result<InventoryItem, ClaimError> {
        let identifier = ItemIdentifier::parse(identifier)?;
        let item = self.owned_item(&identifier, owner)?;

        let plan = item.warranty_plan().copied().unwrap_or_default();
        if plan.anchor() != Some(WarrantyAnchor::Installation) {
            return Err(ClaimError::InvalidState(
                "warranty is not anchored on installation".to_string(),
            ));
        }

        let expires_on = compute_expiration(&plan, Some(installed_on));
        let item = self
            .registry
            .anchor_warranty(
                item.id_typed(),
                owner,
                installed_on,
                expires_on,
                ExpectedVersion::Exact(item.version()),
                occurred_at,
            )
            .map_err(|e| stale_as_transient(e, &identifier))?;

        info!(item_id = %item.id_typed(), %installed_on, "installation recorded");
        Ok(item)
    }

    fn owned_item(&self, identifier: &ItemIdentifier, owner: OwnerId) -> Result<InventoryItem, ClaimError> {
        let item = self.registry.find_by_identifier(identifier)?;
        if !item.is_owned_by(owner) {
            return Err(ClaimError::NotOwner);
        }
        Ok(item)
    }
}

fn ownership_transfer(item: &InventoryItem, request: &ClaimRequest) -> OwnershipTransfer {
    let today = request.today();
    let warranty_plan = item.product().map(|p| p.warranty).unwrap_or_default();
    let warranty_anchor_date = resolve_anchor_date(&warranty_plan, request.sale_date, today);

    OwnershipTransfer {
        item_id: item.id_typed(),
        owner: request.owner,
        display_name: request.display_name.clone(),
        acquisition: request.acquisition,
        sale_date: request.sale_date,
        warranty_plan,
        warranty_anchor_date,
        warranty_expires_on: compute_expiration(&warranty_plan, warranty_anchor_date),
        registered_on: today,
        occurred_at: request.occurred_at,
    }
}

fn stale_as_transient(err: RegistryError, identifier: &ItemIdentifier) -> ClaimError {
    match err {
        RegistryError::VersionConflict { .. } => ClaimError::TransientConflict {
            identifier: identifier.as_str().to_string(),
        },
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimtrack_warranty::WarrantyDuration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn purchase_anchor_defaults_to_today() {
        let plan = WarrantyPlan::Purchase(WarrantyDuration::months(12));
        assert_eq!(resolve_anchor_date(&plan, None, date(2024, 3, 1)), Some(date(2024, 3, 1)));
        assert_eq!(
            resolve_anchor_date(&plan, Some(date(2024, 1, 31)), date(2024, 3, 1)),
            Some(date(2024, 1, 31))
        );
    }

    #[test]
    fn registration_anchor_follows_the_sale_date() {
        let plan = WarrantyPlan::Registration(WarrantyDuration::months(12));
        assert_eq!(
            resolve_anchor_date(&plan, Some(date(2023, 12, 1)), date(2024, 3, 1)),
            Some(date(2023, 12, 1))
        );
        assert_eq!(resolve_anchor_date(&plan, None, date(2024, 3, 1)), None);
    }

    #[test]
    fn installation_anchor_waits_for_a_date() {
        let plan = WarrantyPlan::Installation(WarrantyDuration::years(1));
        assert_eq!(resolve_anchor_date(&plan, None, date(2024, 3, 1)), None);
        assert_eq!(
            resolve_anchor_date(&plan, Some(date(2024, 2, 1)), date(2024, 3, 1)),
            Some(date(2024, 2, 1))
        );
    }

    #[test]
    fn no_warranty_has_no_anchor() {
        assert_eq!(
            resolve_anchor_date(&WarrantyPlan::NoWarranty, Some(date(2024, 1, 1)), date(2024, 3, 1)),
            None
        );
    }
}
