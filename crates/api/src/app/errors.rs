use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use claimtrack_claims::ClaimError;
use claimtrack_inventory::RegistryError;

pub fn claim_error_to_response(err: ClaimError) -> axum::response::Response {
    match err {
        ClaimError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        ClaimError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        e @ ClaimError::TransientConflict { .. } => {
            json_error(StatusCode::CONFLICT, "transient_conflict", e.to_string())
        }
        ClaimError::NotOwner => json_error(
            StatusCode::FORBIDDEN,
            "not_owner",
            "caller is not the owner of the item",
        ),
        ClaimError::InvalidState(msg) => json_error(StatusCode::CONFLICT, "invalid_state", msg),
        ClaimError::Registry(e) => registry_error_to_response(e),
    }
}

pub fn registry_error_to_response(err: RegistryError) -> axum::response::Response {
    match err {
        RegistryError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        e @ RegistryError::VersionConflict { .. } => {
            json_error(StatusCode::CONFLICT, "version_conflict", e.to_string())
        }
        RegistryError::NotOwner => json_error(
            StatusCode::FORBIDDEN,
            "not_owner",
            "caller is not the owner of the item",
        ),
        e @ RegistryError::DuplicateSerial(_) => {
            json_error(StatusCode::CONFLICT, "duplicate_serial", e.to_string())
        }
        RegistryError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        RegistryError::InvalidTransition(msg) => json_error(StatusCode::CONFLICT, "invalid_state", msg),
        RegistryError::Storage(msg) => {
            tracing::error!(error = %msg, "registry storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", "storage failure")
        }
    }
}

/// 409 for a single claim blocked by another owner; only the name is disclosed.
pub fn conflict_other_owner(other_owner_name: String) -> axum::response::Response {
    (
        StatusCode::CONFLICT,
        axum::Json(json!({
            "error": "conflict_other_owner",
            "message": "item is registered to another owner",
            "otherOwnerName": other_owner_name,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_errors_map_to_statuses() {
        let cases = [
            (ClaimError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ClaimError::NotFound, StatusCode::NOT_FOUND),
            (
                ClaimError::TransientConflict {
                    identifier: "SN-1".into(),
                },
                StatusCode::CONFLICT,
            ),
            (ClaimError::NotOwner, StatusCode::FORBIDDEN),
            (
                ClaimError::Registry(RegistryError::Storage("disk".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(claim_error_to_response(err).status(), status);
        }
    }
}
