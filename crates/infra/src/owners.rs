//! In-memory owner directory.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::warn;

use claimtrack_claims::{OwnerDirectory, OwnerProfile};
use claimtrack_core::OwnerId;

/// Owner profiles keyed by id, refreshed from authenticated sessions.
#[derive(Debug, Default)]
pub struct InMemoryOwnerDirectory {
    profiles: RwLock<HashMap<OwnerId, OwnerProfile>>,
}

impl InMemoryOwnerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = OwnerProfile>) -> Self {
        let directory = Self::new();
        for profile in profiles {
            directory.remember(profile);
        }
        directory
    }
}

impl OwnerDirectory for InMemoryOwnerDirectory {
    fn profile(&self, owner: OwnerId) -> Option<OwnerProfile> {
        self.profiles.read().ok()?.get(&owner).cloned()
    }

    fn remember(&self, profile: OwnerProfile) {
        match self.profiles.write() {
            Ok(mut profiles) => {
                profiles.insert(profile.owner_id, profile);
            }
            Err(_) => warn!("owner directory lock poisoned; profile not stored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimtrack_claims::UNKNOWN_OWNER_NAME;

    fn profile(owner_id: OwnerId, name: &str) -> OwnerProfile {
        OwnerProfile {
            owner_id,
            name: name.to_string(),
            email: Some(format!("{}@example.com", name.to_lowercase())),
        }
    }

    #[test]
    fn public_name_exposes_only_the_name() {
        let owner = OwnerId::new();
        let directory = InMemoryOwnerDirectory::with_profiles([profile(owner, "Ada")]);

        assert_eq!(directory.public_name(owner), "Ada");
        assert_eq!(directory.profile(owner).unwrap().email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn unknown_owners_get_a_placeholder() {
        let directory = InMemoryOwnerDirectory::new();
        assert_eq!(directory.public_name(OwnerId::new()), UNKNOWN_OWNER_NAME);
    }

    #[test]
    fn remember_refreshes_a_profile() {
        let owner = OwnerId::new();
        let directory = InMemoryOwnerDirectory::with_profiles([profile(owner, "Ada")]);
        directory.remember(profile(owner, "Ada L."));
        assert_eq!(directory.public_name(owner), "Ada L.");
    }
}
