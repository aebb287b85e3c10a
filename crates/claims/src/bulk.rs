//! Batch ownership claims.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use claimtrack_core::OwnerId;
use claimtrack_inventory::{Acquisition, InventoryRegistry, ItemIdentifier, RegistryError};

use crate::coordinator::{ClaimOutcome, OwnershipClaimCoordinator};
use crate::directory::OwnerDirectory;
use crate::error::ClaimError;
use crate::request::{ClaimRequest, validate_display_name};

/// Many identifiers claimed at once by one owner under one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkClaimBatch {
    pub owner: OwnerId,
    pub display_name: String,
    pub identifiers: Vec<String>,
    #[serde(default)]
    pub sale_date: Option<NaiveDate>,
    #[serde(default)]
    pub acquisition: Acquisition,
    pub occurred_at: DateTime<Utc>,
}

impl BulkClaimBatch {
    fn request_for(&self, identifier: &str) -> ClaimRequest {
        ClaimRequest {
            identifier: identifier.to_string(),
            owner: self.owner,
            display_name: self.display_name.clone(),
            sale_date: self.sale_date,
            acquisition: self.acquisition,
            occurred_at: self.occurred_at,
        }
    }

    /// Reject malformed batches before anything touches the registry.
    ///
    /// Duplicates are detected on the normalized serial form, so `sn-1` and
    /// `SN-1 ` count as the same identifier.
    pub fn validate(&self) -> Result<Vec<ItemIdentifier>, ClaimError> {
        if self.identifiers.is_empty() {
            return Err(ClaimError::Validation("batch contains no identifiers".to_string()));
        }
        validate_display_name(&self.display_name)?;

        let mut seen = HashSet::with_capacity(self.identifiers.len());
        let mut parsed = Vec::with_capacity(self.identifiers.len());
        for (idx, raw) in self.identifiers.iter().enumerate() {
            let identifier = ItemIdentifier::parse(raw)
                .map_err(|_| ClaimError::Validation(format!("identifier at index {idx} is empty")))?;
            if !seen.insert(identifier.normalized().to_string()) {
                return Err(ClaimError::Validation(format!(
                    "duplicate identifier '{}' in batch",
                    identifier.as_str()
                )));
            }
            parsed.push(identifier);
        }
        Ok(parsed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictEntry {
    pub identifier: String,
    /// Redacted identity of the blocking owner (name only).
    pub other_owner_name: String,
}

/// An item that could not be settled after the coordinator's retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedEntry {
    pub identifier: String,
    pub reason: String,
}

/// Disjoint partition of a batch's identifiers by outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkClaimReport {
    pub registered: Vec<String>,
    pub already_owned_by_self: Vec<String>,
    pub conflict: Vec<ConflictEntry>,
    pub not_found: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedEntry>,
}

impl BulkClaimReport {
    /// Every identifier in the report, across all buckets.
    pub fn identifiers(&self) -> Vec<&str> {
        self.registered
            .iter()
            .chain(&self.already_owned_by_self)
            .map(String::as_str)
            .chain(self.conflict.iter().map(|c| c.identifier.as_str()))
            .chain(self.not_found.iter().map(String::as_str))
            .chain(self.failed.iter().map(|f| f.identifier.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registered.len()
            + self.already_owned_by_self.len()
            + self.conflict.len()
            + self.not_found.len()
            + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Applies the single-item claim rule to each identifier of a batch, in order.
#[derive(Debug)]
pub struct BulkClaimProcessor<R, D> {
    coordinator: Arc<OwnershipClaimCoordinator<R, D>>,
}

impl<R, D> Clone for BulkClaimProcessor<R, D> {
    fn clone(&self) -> Self {
        Self {
            coordinator: Arc::clone(&self.coordinator),
        }
    }
}

impl<R, D> BulkClaimProcessor<R, D>
where
    R: InventoryRegistry,
    D: OwnerDirectory,
{
    pub fn new(coordinator: Arc<OwnershipClaimCoordinator<R, D>>) -> Self {
        Self { coordinator }
    }

    /// Claim every identifier of the batch and partition the outcomes.
    ///
    /// Only a malformed batch (empty, blank or duplicate identifiers) fails
    /// as a whole; per-item outcomes always land in the report. An item named
    /// twice through different identifiers (id and serial) is a duplicate.
    #[instrument(
        skip(self, batch),
        fields(owner = %batch.owner, size = batch.identifiers.len()),
        err
    )]
    pub fn process_batch(&self, batch: &BulkClaimBatch) -> Result<BulkClaimReport, ClaimError> {
        let identifiers = batch.validate()?;
        self.reject_aliases(&identifiers)?;
        let mut report = BulkClaimReport::default();

        for identifier in identifiers {
            let label = identifier.as_str().to_string();
            let request = batch.request_for(identifier.as_str());

            match self.coordinator.claim(&request) {
                Ok(ClaimOutcome::Registered(_)) => report.registered.push(label),
                Ok(ClaimOutcome::AlreadyOwnedBySameOwner(_)) => report.already_owned_by_self.push(label),
                Ok(ClaimOutcome::NotFound) => report.not_found.push(label),
                Ok(ClaimOutcome::ConflictOtherOwner { current_owner }) => {
                    report.conflict.push(ConflictEntry {
                        identifier: label,
                        other_owner_name: self.coordinator.directory().public_name(current_owner),
                    });
                }
                Err(e) => {
                    warn!(identifier = %label, error = %e, "bulk item failed");
                    report.failed.push(FailedEntry {
                        identifier: label,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            registered = report.registered.len(),
            already_owned = report.already_owned_by_self.len(),
            conflict = report.conflict.len(),
            not_found = report.not_found.len(),
            failed = report.failed.len(),
            "bulk claim processed"
        );
        Ok(report)
    }

    /// Read-only pass that fails the batch when two identifiers resolve to
    /// the same item.
    fn reject_aliases(&self, identifiers: &[ItemIdentifier]) -> Result<(), ClaimError> {
        let registry = self.coordinator.registry();
        let mut seen = HashSet::with_capacity(identifiers.len());
        for identifier in identifiers {
            let item = match registry.find_by_identifier(identifier) {
                Ok(item) => item,
                Err(RegistryError::NotFound) => continue,
                Err(e) => return Err(e.into()),
            };
            if !seen.insert(item.id_typed()) {
                return Err(ClaimError::Validation(format!(
                    "identifier '{}' names an item already in the batch",
                    identifier.as_str()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimtrack_core::ExpectedVersion;
    use claimtrack_inventory::{Committed, InventoryCommand, InventoryItem, InventoryItemId, RecordedEvent, RegistryError};

    use crate::directory::OwnerProfile;

    /// Registry that fails the test if anything reaches it.
    struct UntouchableRegistry;

    impl InventoryRegistry for UntouchableRegistry {
        fn find_by_identifier(&self, _: &ItemIdentifier) -> Result<InventoryItem, RegistryError> {
            panic!("registry accessed during validation");
        }

        fn get(&self, _: InventoryItemId) -> Result<InventoryItem, RegistryError> {
            panic!("registry accessed during validation");
        }

        fn execute(&self, _: InventoryCommand, _: ExpectedVersion) -> Result<Committed, RegistryError> {
            panic!("registry accessed during validation");
        }

        fn history(&self, _: InventoryItemId) -> Result<Vec<RecordedEvent>, RegistryError> {
            panic!("registry accessed during validation");
        }
    }

    struct NoDirectory;

    impl OwnerDirectory for NoDirectory {
        fn profile(&self, _: OwnerId) -> Option<OwnerProfile> {
            None
        }

        fn remember(&self, _: OwnerProfile) {}
    }

    fn processor() -> BulkClaimProcessor<UntouchableRegistry, NoDirectory> {
        BulkClaimProcessor::new(Arc::new(OwnershipClaimCoordinator::new(UntouchableRegistry, NoDirectory)))
    }

    fn batch(identifiers: &[&str]) -> BulkClaimBatch {
        BulkClaimBatch {
            owner: OwnerId::new(),
            display_name: "Fleet".to_string(),
            identifiers: identifiers.iter().map(|s| s.to_string()).collect(),
            sale_date: None,
            acquisition: Acquisition::Purchase,
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_identifiers_reject_the_whole_batch() {
        let err = processor().process_batch(&batch(&["SN-1", "SN-2", "sn-1 "])).unwrap_err();
        assert!(matches!(err, ClaimError::Validation(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn empty_batch_is_rejected() {
        let err = processor().process_batch(&batch(&[])).unwrap_err();
        assert!(matches!(err, ClaimError::Validation(_)));
    }

    #[test]
    fn overlong_display_name_rejects_the_whole_batch() {
        let mut long = batch(&["SN-1", "SN-2"]);
        long.display_name = "x".repeat(121);
        let err = processor().process_batch(&long).unwrap_err();
        assert!(matches!(err, ClaimError::Validation(msg) if msg.contains("120")));
    }

    #[test]
    fn blank_identifier_is_rejected_with_its_position() {
        let err = processor().process_batch(&batch(&["SN-1", "  "])).unwrap_err();
        assert!(matches!(err, ClaimError::Validation(msg) if msg.contains("index 1")));
    }

    #[test]
    fn report_serializes_wire_shape() {
        let report = BulkClaimReport {
            registered: vec!["SN-1".to_string()],
            already_owned_by_self: vec![],
            conflict: vec![ConflictEntry {
                identifier: "SN-2".to_string(),
                other_owner_name: "Ada".to_string(),
            }],
            not_found: vec!["SN-3".to_string()],
            failed: vec![],
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "registered": ["SN-1"],
                "alreadyOwnedBySelf": [],
                "conflict": [{"identifier": "SN-2", "otherOwnerName": "Ada"}],
                "notFound": ["SN-3"]
            })
        );
        assert_eq!(report.identifiers(), vec!["SN-1", "SN-2", "SN-3"]);
    }
}
