use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use claimtrack_core::OwnerId;

use crate::{Capability, JwtClaims, Role, capabilities_for_role};

/// An authenticated caller with its capabilities already resolved.
///
/// Built once per request at the transport edge and passed explicitly to
/// every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    owner_id: OwnerId,
    display_name: Option<String>,
    email: Option<String>,
    roles: Vec<Role>,
    capabilities: HashSet<Capability>,
}

impl Session {
    pub fn new(owner_id: OwnerId, display_name: Option<String>, roles: Vec<Role>) -> Self {
        let capabilities = roles.iter().flat_map(capabilities_for_role).collect();
        Self {
            owner_id,
            display_name,
            email: None,
            roles,
            capabilities,
        }
    }

    pub fn from_claims(claims: &JwtClaims) -> Self {
        let mut session = Self::new(claims.sub, claims.name.clone(), claims.roles.clone());
        session.email = claims.email.clone();
        session
    }

    /// Grant extra capabilities on top of the role policy.
    pub fn with_capabilities(mut self, extra: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities.extend(extra);
        self
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Capabilities sorted for stable output.
    pub fn capabilities(&self) -> Vec<&str> {
        let mut caps: Vec<&str> = self.capabilities.iter().map(Capability::as_str).collect();
        caps.sort_unstable();
        caps
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum AuthzError {
    #[error("forbidden: missing capability '{0}'")]
    Forbidden(String),
}

/// Pure capability check: no IO, no ambient state.
pub fn has_capability(session: &Session, required: &Capability) -> bool {
    session.capabilities.contains(&Capability::WILDCARD) || session.capabilities.contains(required)
}

pub fn authorize(session: &Session, required: &Capability) -> Result<(), AuthzError> {
    if has_capability(session, required) {
        Ok(())
    } else {
        tracing::debug!(owner = %session.owner_id, capability = %required, "capability denied");
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}
