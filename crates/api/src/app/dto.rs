use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use claimtrack_core::AggregateRoot;
use claimtrack_inventory::{Acquisition, InventoryItem, ItemState, ProductSummary, RecordedEvent};
use claimtrack_warranty::{WarrantyPlan, WarrantyStatus, warranty_status};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub identifier: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimItemRequest {
    pub item_reference: String,
    pub display_name: String,
    #[serde(default)]
    pub sale_date: Option<NaiveDate>,
    #[serde(default)]
    pub acquisition: Acquisition,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkClaimRequest {
    pub identifiers: Vec<String>,
    /// Defaults to the caller; anyone else requires the on-behalf capability.
    #[serde(default)]
    pub requesting_owner_ref: Option<String>,
    pub display_name: String,
    #[serde(default)]
    pub sale_date: Option<NaiveDate>,
    #[serde(default)]
    pub acquisition: Acquisition,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationRequest {
    pub installed_on: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionProductRequest {
    /// Catalog reference; a fresh id is assigned when omitted.
    #[serde(default)]
    pub product_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub warranty: WarrantyPlan,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionItemRequest {
    pub serial_number: String,
    pub product: ProvisionProductRequest,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRequest {
    #[serde(default)]
    pub reason: Option<String>,
    /// Version the caller last saw; omitted means "whatever is current".
    #[serde(default)]
    pub expected_version: Option<u64>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub found: bool,
    pub conflict_other_owner: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_owner_name: Option<String>,
    pub already_owned_by_self: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_summary: Option<serde_json::Value>,
}

pub fn state_str(state: ItemState) -> &'static str {
    match state {
        ItemState::InStock => "in_stock",
        ItemState::Sold => "sold",
        ItemState::Rented => "rented",
    }
}

pub fn product_to_json(product: &ProductSummary) -> serde_json::Value {
    json!({
        "productId": product.product_id.to_string(),
        "name": product.name,
        "warranty": product.warranty,
    })
}

pub fn warranty_status_to_json(status: WarrantyStatus) -> serde_json::Value {
    match status {
        WarrantyStatus::NoWarranty => json!({ "status": "no_warranty" }),
        WarrantyStatus::NotAnchored => json!({ "status": "not_anchored" }),
        WarrantyStatus::Active {
            expires_on,
            days_remaining,
        } => json!({
            "status": "active",
            "expiresOn": expires_on,
            "daysRemaining": days_remaining,
        }),
        WarrantyStatus::Expired { expired_on } => json!({
            "status": "expired",
            "expiredOn": expired_on,
        }),
    }
}

/// Item summary as seen by a caller.
///
/// Without `with_owner_details` the owner reference and label are withheld;
/// callers only learn whether the item is owned.
pub fn item_to_json(item: &InventoryItem, today: NaiveDate, with_owner_details: bool) -> serde_json::Value {
    let plan = item
        .warranty_plan()
        .copied()
        .or_else(|| item.product().map(|p| p.warranty))
        .unwrap_or_default();
    let status = warranty_status(&plan, item.warranty_anchor_date(), today);

    let mut body = json!({
        "itemReference": item.id_typed().to_string(),
        "serialNumber": item.serial_number(),
        "state": state_str(item.state()),
        "owned": item.owner().is_some(),
        "product": item.product().map(product_to_json),
        "registrationDate": item.registration_date(),
        "warranty": {
            "plan": plan,
            "anchorDate": item.warranty_anchor_date(),
            "expiresOn": item.warranty_expires_on(),
            "status": warranty_status_to_json(status),
        },
        "version": item.version(),
    });

    if with_owner_details {
        body["ownerRef"] = json!(item.owner().map(|o| o.to_string()));
        body["displayName"] = json!(item.display_name());
        body["acquiredOn"] = json!(item.acquired_on());
    }

    body
}

pub fn history_to_json(events: &[RecordedEvent]) -> serde_json::Value {
    json!(
        events
            .iter()
            .map(|e| json!({
                "eventId": e.event_id.to_string(),
                "sequenceNumber": e.sequence_number,
                "eventType": e.event_type,
                "occurredAt": e.occurred_at.to_rfc3339(),
                "payload": e.payload,
            }))
            .collect::<Vec<_>>()
    )
}
