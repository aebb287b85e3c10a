use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;

use claimtrack_auth::{Capability, Session};
use claimtrack_core::{AggregateId, ExpectedVersion, ProductId};
use claimtrack_inventory::{InventoryItemId, InventoryRegistry, ItemIdentifier, ProductSummary};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;

pub fn router() -> Router {
    Router::new()
        .route("/items", post(provision_item))
        .route("/items/:id/release", post(release_item))
}

pub async fn provision_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Json(body): Json<dto::ProvisionItemRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&session, &Capability::ITEMS_PROVISION) {
        return resp;
    }

    let product_id = match body.product.product_id.as_deref() {
        None => ProductId::new(),
        Some(raw) => match raw.parse() {
            Ok(v) => v,
            Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
        },
    };
    let product = ProductSummary {
        product_id,
        name: body.product.name,
        warranty: body.product.warranty,
    };

    let now = Utc::now();
    let item_id = InventoryItemId::new(AggregateId::new());
    match services
        .registry
        .provision(item_id, &body.serial_number, product, now)
    {
        Ok(item) => {
            tracing::info!(item_id = %item_id, "item provisioned");
            (
                StatusCode::CREATED,
                Json(dto::item_to_json(&item, now.date_naive(), true)),
            )
                .into_response()
        }
        Err(e) => errors::registry_error_to_response(e),
    }
}

pub async fn release_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    body: Option<Json<dto::ReleaseRequest>>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&session, &Capability::ITEMS_RELEASE) {
        return resp;
    }
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let identifier = match ItemIdentifier::parse(&id) {
        Ok(v) => v,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
    };
    let item = match services.registry.find_by_identifier(&identifier) {
        Ok(item) => item,
        Err(e) => return errors::registry_error_to_response(e),
    };
    let expected = body
        .expected_version
        .map_or(ExpectedVersion::Any, ExpectedVersion::Exact);

    let now = Utc::now();
    match services
        .registry
        .release_ownership(item.id_typed(), body.reason, expected, now)
    {
        Ok(item) => {
            tracing::info!(item_id = %item.id_typed(), "ownership released");
            Json(dto::item_to_json(&item, now.date_naive(), true)).into_response()
        }
        Err(e) => errors::registry_error_to_response(e),
    }
}
