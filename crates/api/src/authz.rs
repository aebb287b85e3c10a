//! API-side capability guard.
//!
//! Handlers check the session's resolved capabilities before touching the
//! coordinator, keeping the domain crates auth-agnostic.

use axum::http::StatusCode;
use axum::response::Response;

use claimtrack_auth::{Capability, Session, authorize, has_capability};
use claimtrack_inventory::InventoryItem;

use crate::app::errors;

/// Require a capability or produce a 403 response.
pub fn require(session: &Session, capability: &Capability) -> Result<(), Response> {
    authorize(session, capability).map_err(|e| errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()))
}

/// Whether the caller may see owner details (owner ref, label, history) of an item.
///
/// The owner always can; so can callers acting on behalf of others.
pub fn can_see_owner_details(session: &Session, item: &InventoryItem) -> bool {
    item.is_owned_by(session.owner_id()) || has_capability(session, &Capability::ITEMS_CLAIM_ON_BEHALF)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimtrack_auth::Role;
    use claimtrack_core::{AggregateId, OwnerId};
    use claimtrack_inventory::InventoryItemId;

    #[test]
    fn customers_cannot_provision() {
        let session = Session::new(OwnerId::new(), None, vec![Role::CUSTOMER]);
        assert!(require(&session, &Capability::ITEMS_CLAIM).is_ok());
        let denied = require(&session, &Capability::ITEMS_PROVISION).unwrap_err();
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn dealers_see_details_of_items_they_do_not_own() {
        let item = InventoryItem::empty(InventoryItemId::new(AggregateId::new()));
        let dealer = Session::new(OwnerId::new(), None, vec![Role::DEALER]);
        let customer = Session::new(OwnerId::new(), None, vec![Role::CUSTOMER]);
        assert!(can_see_owner_details(&dealer, &item));
        assert!(!can_see_owner_details(&customer, &item));
    }
}
