use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use claimtrack_core::OwnerId;
use claimtrack_inventory::{Acquisition, ItemIdentifier, MAX_DISPLAY_NAME_LEN};

use crate::error::ClaimError;

/// One owner's request to bind one item to themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// Serial number or item id.
    pub identifier: String,
    pub owner: OwnerId,
    pub display_name: String,
    #[serde(default)]
    pub sale_date: Option<NaiveDate>,
    #[serde(default)]
    pub acquisition: Acquisition,
    /// Request time; its UTC date is "today" for warranty anchoring.
    pub occurred_at: DateTime<Utc>,
}

impl ClaimRequest {
    pub fn new(
        identifier: impl Into<String>,
        owner: OwnerId,
        display_name: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            owner,
            display_name: display_name.into(),
            sale_date: None,
            acquisition: Acquisition::default(),
            occurred_at,
        }
    }

    pub fn with_sale_date(mut self, sale_date: NaiveDate) -> Self {
        self.sale_date = Some(sale_date);
        self
    }

    pub fn with_acquisition(mut self, acquisition: Acquisition) -> Self {
        self.acquisition = acquisition;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.occurred_at.date_naive()
    }

    /// Check the request shape and parse its identifier.
    pub fn validate(&self) -> Result<ItemIdentifier, ClaimError> {
        let identifier = ItemIdentifier::parse(&self.identifier)?;
        validate_display_name(&self.display_name)?;
        Ok(identifier)
    }
}

pub(crate) fn validate_display_name(name: &str) -> Result<(), ClaimError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ClaimError::Validation("display name cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(ClaimError::Validation(format!(
            "display name cannot exceed {MAX_DISPLAY_NAME_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_identifier_fails_validation() {
        let req = ClaimRequest::new("  ", OwnerId::new(), "My Phone", Utc::now());
        assert!(matches!(req.validate(), Err(ClaimError::Validation(_))));
    }

    #[test]
    fn blank_display_name_fails_validation() {
        let req = ClaimRequest::new("SN-001", OwnerId::new(), " ", Utc::now());
        assert!(matches!(req.validate(), Err(ClaimError::Validation(_))));
    }

    #[test]
    fn overlong_display_name_fails_validation() {
        let long = "x".repeat(MAX_DISPLAY_NAME_LEN + 1);
        let req = ClaimRequest::new("SN-001", OwnerId::new(), long, Utc::now());
        assert!(matches!(req.validate(), Err(ClaimError::Validation(msg)) if msg.contains("exceed")));

        let at_limit = ClaimRequest::new("SN-001", OwnerId::new(), "é".repeat(MAX_DISPLAY_NAME_LEN), Utc::now());
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn acquisition_defaults_to_purchase_when_absent() {
        let json = serde_json::json!({
            "identifier": "SN-001",
            "owner": OwnerId::new(),
            "display_name": "My Phone",
            "occurred_at": "2024-01-31T10:00:00Z"
        });
        let req: ClaimRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.acquisition, Acquisition::Purchase);
        assert_eq!(req.sale_date, None);
        assert_eq!(req.today(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }
}
