use serde::{Deserialize, Serialize};

use claimtrack_core::OwnerId;

/// Name shown when the blocking owner has no profile on record.
pub const UNKNOWN_OWNER_NAME: &str = "another owner";

/// What the system knows about an owner identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub owner_id: OwnerId,
    pub name: String,
    pub email: Option<String>,
}

impl OwnerProfile {
    /// The only part of a profile that may be shown to other users.
    pub fn public_name(&self) -> &str {
        &self.name
    }
}

/// Lookup of owner identities, backed by the identity provider.
pub trait OwnerDirectory: Send + Sync {
    fn profile(&self, owner: OwnerId) -> Option<OwnerProfile>;

    /// Record or refresh a profile (e.g. from an authenticated session).
    fn remember(&self, profile: OwnerProfile);

    /// Redacted identity suitable for showing to a different user: name only.
    fn public_name(&self, owner: OwnerId) -> String {
        self.profile(owner)
            .map(|p| p.public_name().trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_OWNER_NAME.to_string())
    }
}

impl<D> OwnerDirectory for std::sync::Arc<D>
where
    D: OwnerDirectory + ?Sized,
{
    fn profile(&self, owner: OwnerId) -> Option<OwnerProfile> {
        (**self).profile(owner)
    }

    fn remember(&self, profile: OwnerProfile) {
        (**self).remember(profile)
    }
}
