use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use claimtrack_core::OwnerId;

use crate::Role;

/// Token claims (transport-agnostic).
///
/// The minimal set claimtrack expects once a token has been decoded by the
/// transport layer. Contact fields stay inside the session; only `name` is
/// ever shown to other users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the owner identity acting in this session.
    pub sub: OwnerId,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    pub roles: Vec<Role>,

    pub issued_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,

    #[error("malformed token: {0}")]
    Malformed(String),
}

/// Deterministically validate the claims' time window against `now`.
///
/// Signature checks happen in the [`crate::JwtValidator`] implementation.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(issued_at: DateTime<Utc>, ttl: Duration) -> JwtClaims {
        JwtClaims {
            sub: OwnerId::new(),
            name: Some("Ada".to_string()),
            email: None,
            roles: vec![Role::CUSTOMER],
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    #[test]
    fn accepts_tokens_inside_their_window() {
        let now = Utc::now();
        assert!(validate_claims(&claims(now, Duration::minutes(5)), now).is_ok());
    }

    #[test]
    fn rejects_expired_and_future_tokens() {
        let now = Utc::now();
        let c = claims(now, Duration::minutes(5));
        assert_eq!(validate_claims(&c, now + Duration::minutes(5)), Err(TokenValidationError::Expired));
        assert_eq!(
            validate_claims(&c, now - Duration::seconds(1)),
            Err(TokenValidationError::NotYetValid)
        );
    }

    #[test]
    fn rejects_inverted_windows() {
        let now = Utc::now();
        assert_eq!(
            validate_claims(&claims(now, Duration::zero()), now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn contact_fields_are_optional_on_the_wire() {
        let sub = OwnerId::new();
        let decoded: JwtClaims = serde_json::from_value(serde_json::json!({
            "sub": sub.to_string(),
            "roles": ["dealer"],
            "issued_at": "2024-01-01T00:00:00Z",
            "expires_at": "2024-01-01T01:00:00Z"
        }))
        .unwrap();
        assert_eq!(decoded.sub, sub);
        assert_eq!(decoded.name, None);
        assert_eq!(decoded.email, None);
        assert_eq!(decoded.roles, vec![Role::DEALER]);
    }
}
