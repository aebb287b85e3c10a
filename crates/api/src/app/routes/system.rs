use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use claimtrack_auth::Session;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(session): Extension<Session>) -> impl IntoResponse {
    Json(serde_json::json!({
        "ownerRef": session.owner_id().to_string(),
        "name": session.display_name(),
        "roles": session.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        "capabilities": session.capabilities(),
    }))
}
