use claimtrack_core::{AggregateId, DomainError, DomainResult};

use crate::item::InventoryItemId;

/// Canonical form of a serial number used for uniqueness and lookup.
pub fn normalize_serial(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// A user-supplied reference to an item: either its id or its serial number.
///
/// Matching is case-insensitive and ignores surrounding whitespace, so
/// `" sn-001 "` and `"SN-001"` resolve to the same item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemIdentifier {
    raw: String,
    normalized: String,
}

impl ItemIdentifier {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("identifier cannot be empty"));
        }
        Ok(Self {
            raw: trimmed.to_string(),
            normalized: normalize_serial(trimmed),
        })
    }

    /// The identifier as the caller wrote it (trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Interpret the identifier as an item id, if it is shaped like one.
    pub fn as_item_id(&self) -> Option<InventoryItemId> {
        self.raw.parse::<AggregateId>().ok().map(InventoryItemId::new)
    }
}

impl core::fmt::Display for ItemIdentifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_identifiers_are_rejected() {
        assert!(matches!(ItemIdentifier::parse("   "), Err(DomainError::Validation(_))));
    }

    #[test]
    fn serial_matching_ignores_case_and_whitespace() {
        let a = ItemIdentifier::parse(" sn-001 ").unwrap();
        let b = ItemIdentifier::parse("SN-001").unwrap();
        assert_eq!(a.normalized(), b.normalized());
        assert_eq!(a.as_str(), "sn-001");
    }

    #[test]
    fn uuid_shaped_identifiers_resolve_to_item_ids() {
        let id = InventoryItemId::new(AggregateId::new());
        let ident = ItemIdentifier::parse(&id.to_string().to_uppercase()).unwrap();
        assert_eq!(ident.as_item_id(), Some(id));
        assert_eq!(ItemIdentifier::parse("SN-1").unwrap().as_item_id(), None);
    }
}
