use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Capability identifier (e.g. "items.claim").
///
/// Capabilities are opaque strings. The wildcard `"*"` grants everything and
/// is only handed out by the policy layer, never hardcoded into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    pub const WILDCARD: Capability = Capability::from_static("*");

    pub const ITEMS_READ: Capability = Capability::from_static("items.read");
    pub const ITEMS_VERIFY: Capability = Capability::from_static("items.verify");
    pub const ITEMS_CLAIM: Capability = Capability::from_static("items.claim");
    pub const ITEMS_CLAIM_BULK: Capability = Capability::from_static("items.claim.bulk");
    /// Claim on behalf of another owner (dealers registering customer units).
    pub const ITEMS_CLAIM_ON_BEHALF: Capability = Capability::from_static("items.claim.on_behalf");
    pub const ITEMS_RENAME: Capability = Capability::from_static("items.rename");
    pub const ITEMS_PROVISION: Capability = Capability::from_static("items.provision");
    pub const ITEMS_RELEASE: Capability = Capability::from_static("items.release");

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
