use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Capability;

/// Role identifier carried in tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));
    pub const DEALER: Role = Role(Cow::Borrowed("dealer"));
    pub const CUSTOMER: Role = Role(Cow::Borrowed("customer"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role → capability policy.
///
/// Role names are matched case-insensitively; unknown roles grant nothing.
pub fn capabilities_for_role(role: &Role) -> Vec<Capability> {
    let customer = [
        Capability::ITEMS_READ,
        Capability::ITEMS_VERIFY,
        Capability::ITEMS_CLAIM,
        Capability::ITEMS_RENAME,
    ];

    match role.as_str().to_ascii_lowercase().as_str() {
        "admin" => vec![Capability::WILDCARD],
        "dealer" => customer
            .into_iter()
            .chain([Capability::ITEMS_CLAIM_BULK, Capability::ITEMS_CLAIM_ON_BEHALF])
            .collect(),
        "customer" | "user" => customer.to_vec(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_gets_wildcard() {
        assert_eq!(capabilities_for_role(&Role::ADMIN), vec![Capability::WILDCARD]);
    }

    #[test]
    fn dealer_extends_customer() {
        let dealer = capabilities_for_role(&Role::DEALER);
        for cap in capabilities_for_role(&Role::CUSTOMER) {
            assert!(dealer.contains(&cap));
        }
        assert!(dealer.contains(&Capability::ITEMS_CLAIM_BULK));
    }

    #[test]
    fn role_names_are_case_insensitive() {
        assert_eq!(
            capabilities_for_role(&Role::new("Customer")),
            capabilities_for_role(&Role::CUSTOMER)
        );
    }

    #[test]
    fn unknown_roles_grant_nothing() {
        assert!(capabilities_for_role(&Role::new("intern")).is_empty());
    }
}
