use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use claimtrack_core::{Aggregate, AggregateId, AggregateRoot, DomainError, OwnerId, ProductId, ValueObject};
use claimtrack_events::Event;
use claimtrack_warranty::WarrantyPlan;

use crate::identifier::normalize_serial;

/// Longest display name an owner may give an item, in characters.
pub const MAX_DISPLAY_NAME_LEN: usize = 120;

/// Inventory item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryItemId(pub AggregateId);

impl InventoryItemId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for InventoryItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Lifecycle state of a unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    InStock,
    Sold,
    Rented,
}

/// How the claiming owner acquired the unit.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acquisition {
    #[default]
    Purchase,
    Rental,
}

impl Acquisition {
    pub fn target_state(self) -> ItemState {
        match self {
            Acquisition::Purchase => ItemState::Sold,
            Acquisition::Rental => ItemState::Rented,
        }
    }
}

/// Catalog data copied onto the item at provisioning time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_id: ProductId,
    pub name: String,
    pub warranty: WarrantyPlan,
}

impl ValueObject for ProductSummary {}

/// Aggregate root: one manufactured unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    id: InventoryItemId,
    serial_number: String,
    product: Option<ProductSummary>,
    state: ItemState,
    owner: Option<OwnerId>,
    display_name: Option<String>,
    acquired_on: Option<NaiveDate>,
    warranty_plan: Option<WarrantyPlan>,
    warranty_anchor_date: Option<NaiveDate>,
    warranty_expires_on: Option<NaiveDate>,
    registration_date: Option<NaiveDate>,
    version: u64,
    provisioned: bool,
}

impl InventoryItem {
    /// Create an empty, not-yet-provisioned instance.
    pub fn empty(id: InventoryItemId) -> Self {
        Self {
            id,
            serial_number: String::new(),
            product: None,
            state: ItemState::InStock,
            owner: None,
            display_name: None,
            acquired_on: None,
            warranty_plan: None,
            warranty_anchor_date: None,
            warranty_expires_on: None,
            registration_date: None,
            version: 0,
            provisioned: false,
        }
    }

    pub fn id_typed(&self) -> InventoryItemId {
        self.id
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn product(&self) -> Option<&ProductSummary> {
        self.product.as_ref()
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn owner(&self) -> Option<OwnerId> {
        self.owner
    }

    pub fn is_owned_by(&self, owner: OwnerId) -> bool {
        self.owner == Some(owner)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Sale (or rental start) date recorded with the claim, if one was given.
    pub fn acquired_on(&self) -> Option<NaiveDate> {
        self.acquired_on
    }

    /// Warranty terms snapshotted from the product when the item was claimed.
    pub fn warranty_plan(&self) -> Option<&WarrantyPlan> {
        self.warranty_plan.as_ref()
    }

    pub fn warranty_anchor_date(&self) -> Option<NaiveDate> {
        self.warranty_anchor_date
    }

    pub fn warranty_expires_on(&self) -> Option<NaiveDate> {
        self.warranty_expires_on
    }

    pub fn registration_date(&self) -> Option<NaiveDate> {
        self.registration_date
    }

    pub fn is_provisioned(&self) -> bool {
        self.provisioned
    }
}

impl AggregateRoot for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: ProvisionItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionItem {
    pub item_id: InventoryItemId,
    pub serial_number: String,
    pub product: ProductSummary,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClaimOwnership.
///
/// Warranty dates are resolved by the caller; the aggregate only guards the
/// state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimOwnership {
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

/// Command: RenameItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameItem {
    pub item_id: InventoryItemId,
    pub owner: OwnerId,
    pub display_name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AnchorWarranty (late anchoring, e.g. on installation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorWarranty {
    pub item_id: InventoryItemId,
    pub owner: OwnerId,
    pub anchor_date: NaiveDate,
    pub expires_on: Option<NaiveDate>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReleaseOwnership (administrative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseOwnership {
    pub item_id: InventoryItemId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    ProvisionItem(ProvisionItem),
    ClaimOwnership(ClaimOwnership),
    RenameItem(RenameItem),
    AnchorWarranty(AnchorWarranty),
    ReleaseOwnership(ReleaseOwnership),
}

impl InventoryCommand {
    pub fn item_id(&self) -> InventoryItemId {
        match self {
            InventoryCommand::ProvisionItem(c) => c.item_id,
            InventoryCommand::ClaimOwnership(c) => c.item_id,
            InventoryCommand::RenameItem(c) => c.item_id,
            InventoryCommand::AnchorWarranty(c) => c.item_id,
            InventoryCommand::ReleaseOwnership(c) => c.item_id,
        }
    }
}

/// Event: ItemProvisioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProvisioned {
    pub item_id: InventoryItemId,
    pub serial_number: String,
    pub product: ProductSummary,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OwnershipClaimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipClaimed {
    pub item_id: InventoryItemId,
    pub owner: OwnerId,
    pub display_name: String,
    pub state: ItemState,
    pub sale_date: Option<NaiveDate>,
    pub warranty_plan: WarrantyPlan,
    pub warranty_anchor_date: Option<NaiveDate>,
    pub warranty_expires_on: Option<NaiveDate>,
    pub registered_on: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DisplayNameChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayNameChanged {
    pub item_id: InventoryItemId,
    pub owner: OwnerId,
    pub display_name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: WarrantyAnchored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantyAnchored {
    pub item_id: InventoryItemId,
    pub anchor_date: NaiveDate,
    pub expires_on: Option<NaiveDate>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OwnershipReleased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipReleased {
    pub item_id: InventoryItemId,
    pub previous_owner: OwnerId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemProvisioned(ItemProvisioned),
    OwnershipClaimed(OwnershipClaimed),
    DisplayNameChanged(DisplayNameChanged),
    WarrantyAnchored(WarrantyAnchored),
    OwnershipReleased(OwnershipReleased),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemProvisioned(_) => "inventory.item.provisioned",
            InventoryEvent::OwnershipClaimed(_) => "inventory.item.ownership_claimed",
            InventoryEvent::DisplayNameChanged(_) => "inventory.item.display_name_changed",
            InventoryEvent::WarrantyAnchored(_) => "inventory.item.warranty_anchored",
            InventoryEvent::OwnershipReleased(_) => "inventory.item.ownership_released",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemProvisioned(e) => e.occurred_at,
            InventoryEvent::OwnershipClaimed(e) => e.occurred_at,
            InventoryEvent::DisplayNameChanged(e) => e.occurred_at,
            InventoryEvent::WarrantyAnchored(e) => e.occurred_at,
            InventoryEvent::OwnershipReleased(e) => e.occurred_at,
        }
    }
}

impl Aggregate for InventoryItem {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::ItemProvisioned(e) => {
                self.id = e.item_id;
                self.serial_number = e.serial_number.trim().to_string();
                self.product = Some(e.product.clone());
                self.state = ItemState::InStock;
                self.provisioned = true;
            }
            InventoryEvent::OwnershipClaimed(e) => {
                self.owner = Some(e.owner);
                self.display_name = Some(e.display_name.clone());
                self.state = e.state;
                self.acquired_on = e.sale_date;
                self.warranty_plan = Some(e.warranty_plan);
                self.warranty_anchor_date = e.warranty_anchor_date;
                self.warranty_expires_on = e.warranty_expires_on;
                // First successful claim wins; re-claims after a release keep it.
                self.registration_date.get_or_insert(e.registered_on);
            }
            InventoryEvent::DisplayNameChanged(e) => {
                self.display_name = Some(e.display_name.clone());
            }
            InventoryEvent::WarrantyAnchored(e) => {
                self.warranty_anchor_date = Some(e.anchor_date);
                self.warranty_expires_on = e.expires_on;
            }
            InventoryEvent::OwnershipReleased(_) => {
                self.owner = None;
                self.display_name = None;
                self.state = ItemState::InStock;
                self.acquired_on = None;
                self.warranty_plan = None;
                self.warranty_anchor_date = None;
                self.warranty_expires_on = None;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::ProvisionItem(cmd) => self.handle_provision(cmd),
            InventoryCommand::ClaimOwnership(cmd) => self.handle_claim(cmd),
            InventoryCommand::RenameItem(cmd) => self.handle_rename(cmd),
            InventoryCommand::AnchorWarranty(cmd) => self.handle_anchor(cmd),
            InventoryCommand::ReleaseOwnership(cmd) => self.handle_release(cmd),
        }
    }
}

fn validate_display_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("display name cannot be empty"));
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(DomainError::validation(format!(
            "display name cannot exceed {MAX_DISPLAY_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

impl InventoryItem {
    fn ensure_provisioned(&self) -> Result<(), DomainError> {
        if !self.provisioned {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    fn ensure_item_id(&self, item_id: InventoryItemId) -> Result<(), DomainError> {
        if self.id != item_id {
            return Err(DomainError::invariant("item_id mismatch"));
        }
        Ok(())
    }

    fn ensure_owner(&self, owner: OwnerId) -> Result<(), DomainError> {
        if self.owner != Some(owner) {
            return Err(DomainError::NotOwner);
        }
        Ok(())
    }

    fn handle_provision(&self, cmd: &ProvisionItem) -> Result<Vec<InventoryEvent>, DomainError> {
        if self.provisioned {
            return Err(DomainError::conflict("item already exists"));
        }
        if normalize_serial(&cmd.serial_number).is_empty() {
            return Err(DomainError::validation("serial number cannot be empty"));
        }
        if cmd.product.name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        Ok(vec![InventoryEvent::ItemProvisioned(ItemProvisioned {
            item_id: cmd.item_id,
            serial_number: cmd.serial_number.trim().to_string(),
            product: cmd.product.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_claim(&self, cmd: &ClaimOwnership) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_provisioned()?;
        self.ensure_item_id(cmd.item_id)?;

        if self.owner.is_some() || self.state != ItemState::InStock {
            return Err(DomainError::invariant("only in-stock items can be claimed"));
        }
        let display_name = validate_display_name(&cmd.display_name)?;

        Ok(vec![InventoryEvent::OwnershipClaimed(OwnershipClaimed {
            item_id: cmd.item_id,
            owner: cmd.owner,
            display_name,
            state: cmd.acquisition.target_state(),
            sale_date: cmd.sale_date,
            warranty_plan: cmd.warranty_plan,
            warranty_anchor_date: cmd.warranty_anchor_date,
            warranty_expires_on: cmd.warranty_expires_on,
            registered_on: cmd.registered_on,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_rename(&self, cmd: &RenameItem) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_provisioned()?;
        self.ensure_item_id(cmd.item_id)?;
        self.ensure_owner(cmd.owner)?;

        let display_name = validate_display_name(&cmd.display_name)?;
        if self.display_name.as_deref() == Some(display_name.as_str()) {
            return Ok(vec![]);
        }

        Ok(vec![InventoryEvent::DisplayNameChanged(DisplayNameChanged {
            item_id: cmd.item_id,
            owner: cmd.owner,
            display_name,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_anchor(&self, cmd: &AnchorWarranty) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_provisioned()?;
        self.ensure_item_id(cmd.item_id)?;
        self.ensure_owner(cmd.owner)?;

        match self.warranty_plan {
            Some(plan) if plan.is_covered() => {}
            _ => return Err(DomainError::invariant("item has no warranty to anchor")),
        }
        if self.warranty_anchor_date.is_some() {
            return Err(DomainError::invariant("warranty is already anchored"));
        }

        Ok(vec![InventoryEvent::WarrantyAnchored(WarrantyAnchored {
            item_id: cmd.item_id,
            anchor_date: cmd.anchor_date,
            expires_on: cmd.expires_on,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_release(&self, cmd: &ReleaseOwnership) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_provisioned()?;
        self.ensure_item_id(cmd.item_id)?;

        let Some(previous_owner) = self.owner else {
            return Err(DomainError::invariant("item has no owner to release"));
        };

        Ok(vec![InventoryEvent::OwnershipReleased(OwnershipReleased {
            item_id: cmd.item_id,
            previous_owner,
            reason: cmd.reason.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimtrack_warranty::WarrantyDuration;

    fn test_item_id() -> InventoryItemId {
        InventoryItemId::new(AggregateId::new())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn product() -> ProductSummary {
        ProductSummary {
            product_id: ProductId::new(),
            name: "Phone X".to_string(),
            warranty: WarrantyPlan::Purchase(WarrantyDuration::months(12)),
        }
    }

    fn provisioned(item_id: InventoryItemId) -> InventoryItem {
        let mut item = InventoryItem::empty(item_id);
        let events = item
            .handle(&InventoryCommand::ProvisionItem(ProvisionItem {
                item_id,
                serial_number: " SN-001 ".to_string(),
                product: product(),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        item.apply(&events[0]);
        item
    }

    fn claim_cmd(item_id: InventoryItemId, owner: OwnerId, name: &str) -> InventoryCommand {
        InventoryCommand::ClaimOwnership(ClaimOwnership {
            item_id,
            owner,
            display_name: name.to_string(),
            acquisition: Acquisition::Purchase,
            sale_date: None,
            warranty_plan: WarrantyPlan::Purchase(WarrantyDuration::months(12)),
            warranty_anchor_date: Some(date(2024, 1, 31)),
            warranty_expires_on: Some(date(2025, 1, 31)),
            registered_on: date(2024, 1, 31),
            occurred_at: Utc::now(),
        })
    }

    fn claimed(item_id: InventoryItemId, owner: OwnerId) -> InventoryItem {
        let mut item = provisioned(item_id);
        let events = item.handle(&claim_cmd(item_id, owner, "My Phone")).unwrap();
        item.apply(&events[0]);
        item
    }

    #[test]
    fn provision_emits_item_provisioned_with_trimmed_serial() {
        let item = provisioned(test_item_id());
        assert!(item.is_provisioned());
        assert_eq!(item.serial_number(), "SN-001");
        assert_eq!(item.state(), ItemState::InStock);
        assert_eq!(item.version(), 1);
    }

    #[test]
    fn provision_twice_is_a_conflict() {
        let item_id = test_item_id();
        let item = provisioned(item_id);
        let err = item
            .handle(&InventoryCommand::ProvisionItem(ProvisionItem {
                item_id,
                serial_number: "SN-002".to_string(),
                product: product(),
                occurred_at: Utc::now(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn claim_moves_in_stock_item_to_sold() {
        let item_id = test_item_id();
        let owner = OwnerId::new();
        let item = claimed(item_id, owner);

        assert_eq!(item.owner(), Some(owner));
        assert_eq!(item.state(), ItemState::Sold);
        assert_eq!(item.display_name(), Some("My Phone"));
        assert_eq!(item.registration_date(), Some(date(2024, 1, 31)));
        assert_eq!(item.warranty_expires_on(), Some(date(2025, 1, 31)));
        assert_eq!(item.version(), 2);
    }

    #[test]
    fn rental_claim_moves_item_to_rented() {
        let item_id = test_item_id();
        let mut item = provisioned(item_id);
        let mut cmd = match claim_cmd(item_id, OwnerId::new(), "Loaner") {
            InventoryCommand::ClaimOwnership(c) => c,
            _ => unreachable!(),
        };
        cmd.acquisition = Acquisition::Rental;
        let events = item.handle(&InventoryCommand::ClaimOwnership(cmd)).unwrap();
        item.apply(&events[0]);
        assert_eq!(item.state(), ItemState::Rented);
    }

    #[test]
    fn owned_item_cannot_be_claimed_again() {
        let item_id = test_item_id();
        let item = claimed(item_id, OwnerId::new());
        let err = item.handle(&claim_cmd(item_id, OwnerId::new(), "Mine")).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn claim_of_unprovisioned_item_is_not_found() {
        let item_id = test_item_id();
        let item = InventoryItem::empty(item_id);
        let err = item.handle(&claim_cmd(item_id, OwnerId::new(), "x")).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn blank_display_name_is_rejected() {
        let item_id = test_item_id();
        let item = provisioned(item_id);
        let err = item.handle(&claim_cmd(item_id, OwnerId::new(), "   ")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rename_by_non_owner_is_rejected() {
        let item_id = test_item_id();
        let item = claimed(item_id, OwnerId::new());
        let err = item
            .handle(&InventoryCommand::RenameItem(RenameItem {
                item_id,
                owner: OwnerId::new(),
                display_name: "Stolen".to_string(),
                occurred_at: Utc::now(),
            }))
            .unwrap_err();
        assert_eq!(err, DomainError::NotOwner);
    }

    #[test]
    fn rename_to_same_name_emits_nothing() {
        let item_id = test_item_id();
        let owner = OwnerId::new();
        let item = claimed(item_id, owner);
        let events = item
            .handle(&InventoryCommand::RenameItem(RenameItem {
                item_id,
                owner,
                display_name: " My Phone ".to_string(),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn anchoring_twice_is_rejected() {
        let item_id = test_item_id();
        let owner = OwnerId::new();
        let item = claimed(item_id, owner);
        let err = item
            .handle(&InventoryCommand::AnchorWarranty(AnchorWarranty {
                item_id,
                owner,
                anchor_date: date(2024, 3, 1),
                expires_on: None,
                occurred_at: Utc::now(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(msg) if msg.contains("already anchored")));
    }

    #[test]
    fn release_returns_item_to_stock_but_keeps_registration_date() {
        let item_id = test_item_id();
        let mut item = claimed(item_id, OwnerId::new());
        let events = item
            .handle(&InventoryCommand::ReleaseOwnership(ReleaseOwnership {
                item_id,
                reason: Some("returned".to_string()),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        item.apply(&events[0]);

        assert_eq!(item.owner(), None);
        assert_eq!(item.state(), ItemState::InStock);
        assert_eq!(item.warranty_plan(), None);
        assert_eq!(item.warranty_anchor_date(), None);
        assert_eq!(item.registration_date(), Some(date(2024, 1, 31)));
    }

    #[test]
    fn release_of_unowned_item_is_rejected() {
        let item_id = test_item_id();
        let item = provisioned(item_id);
        let err = item
            .handle(&InventoryCommand::ReleaseOwnership(ReleaseOwnership {
                item_id,
                reason: None,
                occurred_at: Utc::now(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn owner_implies_sold_or_rented() {
        let item = claimed(test_item_id(), OwnerId::new());
        assert!(item.owner().is_some());
        assert!(matches!(item.state(), ItemState::Sold | ItemState::Rented));
    }
}
