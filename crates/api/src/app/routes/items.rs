use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;

use claimtrack_auth::{Capability, Session};
use claimtrack_claims::{BulkClaimBatch, ClaimOutcome, ClaimRequest, OwnerDirectory, OwnerProfile};
use claimtrack_core::OwnerId;
use claimtrack_inventory::{InventoryRegistry, ItemIdentifier};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;

pub fn router() -> Router {
    Router::new()
        .route("/verify", post(verify))
        .route("/claim", post(claim))
        .route("/claim/bulk", post(claim_bulk))
        .route("/:id", get(get_item))
        .route("/:id/history", get(get_history))
        .route("/:id/display-name", put(rename))
        .route("/:id/installation", post(record_installation))
}

/// Keep the directory's view of the caller fresh so conflicts can name them.
fn remember_caller(services: &AppServices, session: &Session) {
    if let Some(name) = session.display_name() {
        services.owners.remember(OwnerProfile {
            owner_id: session.owner_id(),
            name: name.to_string(),
            email: session.email().map(str::to_string),
        });
    }
}

pub async fn verify(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Json(body): Json<dto::VerifyRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&session, &Capability::ITEMS_VERIFY) {
        return resp;
    }

    let preview = match services.coordinator.verify(&body.identifier, session.owner_id()) {
        Ok(p) => p,
        Err(e) => return errors::claim_error_to_response(e),
    };

    Json(dto::VerifyResponse {
        found: preview.found(),
        conflict_other_owner: preview.conflict_other_owner(),
        other_owner_name: preview.other_owner_name.clone(),
        already_owned_by_self: preview.already_owned_by_self,
        item_reference: preview.item.as_ref().map(|i| i.id_typed().to_string()),
        product_summary: preview
            .item
            .as_ref()
            .and_then(|i| i.product())
            .map(dto::product_to_json),
    })
    .into_response()
}

pub async fn claim(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Json(body): Json<dto::ClaimItemRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&session, &Capability::ITEMS_CLAIM) {
        return resp;
    }
    remember_caller(&services, &session);

    let now = Utc::now();
    let mut request = ClaimRequest::new(body.item_reference, session.owner_id(), body.display_name, now)
        .with_acquisition(body.acquisition);
    if let Some(sale_date) = body.sale_date {
        request = request.with_sale_date(sale_date);
    }

    let outcome = match services.coordinator.claim(&request) {
        Ok(o) => o,
        Err(e) => return errors::claim_error_to_response(e),
    };

    let today = now.date_naive();
    match outcome {
        ClaimOutcome::Registered(item) => {
            let mut body = dto::item_to_json(&item, today, true);
            body["outcome"] = "registered".into();
            (StatusCode::CREATED, Json(body)).into_response()
        }
        ClaimOutcome::AlreadyOwnedBySameOwner(item) => {
            let mut body = dto::item_to_json(&item, today, true);
            body["outcome"] = "already_owned_by_self".into();
            (StatusCode::OK, Json(body)).into_response()
        }
        ClaimOutcome::NotFound => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        ClaimOutcome::ConflictOtherOwner { current_owner } => {
            errors::conflict_other_owner(services.owners.public_name(current_owner))
        }
    }
}

pub async fn claim_bulk(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Json(body): Json<dto::BulkClaimRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&session, &Capability::ITEMS_CLAIM_BULK) {
        return resp;
    }

    let owner = match body.requesting_owner_ref.as_deref() {
        None => session.owner_id(),
        Some(raw) => match raw.parse::<OwnerId>() {
            Ok(owner) => owner,
            Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        },
    };
    if owner == session.owner_id() {
        remember_caller(&services, &session);
    } else if let Err(resp) = authz::require(&session, &Capability::ITEMS_CLAIM_ON_BEHALF) {
        return resp;
    }

    let batch = BulkClaimBatch {
        owner,
        display_name: body.display_name,
        identifiers: body.identifiers,
        sale_date: body.sale_date,
        acquisition: body.acquisition,
        occurred_at: Utc::now(),
    };

    match services.bulk.process_batch(&batch) {
        Ok(report) => Json(report).into_response(),
        Err(e) => errors::claim_error_to_response(e),
    }
}

pub async fn rename(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(body): Json<dto::RenameRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&session, &Capability::ITEMS_RENAME) {
        return resp;
    }

    let now = Utc::now();
    match services
        .coordinator
        .rename(session.owner_id(), &id, &body.display_name, now)
    {
        Ok(item) => Json(dto::item_to_json(&item, now.date_naive(), true)).into_response(),
        Err(e) => errors::claim_error_to_response(e),
    }
}

pub async fn record_installation(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(body): Json<dto::InstallationRequest>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&session, &Capability::ITEMS_CLAIM) {
        return resp;
    }

    let now = Utc::now();
    match services
        .coordinator
        .record_installation(session.owner_id(), &id, body.installed_on, now)
    {
        Ok(item) => Json(dto::item_to_json(&item, now.date_naive(), true)).into_response(),
        Err(e) => errors::claim_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&session, &Capability::ITEMS_READ) {
        return resp;
    }

    let identifier = match ItemIdentifier::parse(&id) {
        Ok(v) => v,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
    };

    match services.registry.find_by_identifier(&identifier) {
        Ok(item) => {
            let details = authz::can_see_owner_details(&session, &item);
            Json(dto::item_to_json(&item, Utc::now().date_naive(), details)).into_response()
        }
        Err(e) => errors::registry_error_to_response(e),
    }
}

pub async fn get_history(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authz::require(&session, &Capability::ITEMS_READ) {
        return resp;
    }

    let identifier = match ItemIdentifier::parse(&id) {
        Ok(v) => v,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
    };

    let item = match services.registry.find_by_identifier(&identifier) {
        Ok(item) => item,
        Err(e) => return errors::registry_error_to_response(e),
    };
    if !authz::can_see_owner_details(&session, &item) {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "history is visible to the owner only",
        );
    }

    match services.registry.history(item.id_typed()) {
        Ok(events) => Json(dto::history_to_json(&events)).into_response(),
        Err(e) => errors::registry_error_to_response(e),
    }
}
