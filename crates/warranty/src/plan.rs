use serde::{Deserialize, Serialize};

use claimtrack_core::ValueObject;

/// Calendar unit a warranty duration is expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Days,
    Months,
    Years,
}

/// Length of a warranty window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WarrantyDuration {
    #[serde(rename = "durationValue")]
    pub value: u32,
    #[serde(rename = "durationUnit")]
    pub unit: DurationUnit,
}

impl WarrantyDuration {
    pub fn new(value: u32, unit: DurationUnit) -> Self {
        Self { value, unit }
    }

    pub fn days(value: u32) -> Self {
        Self::new(value, DurationUnit::Days)
    }

    pub fn months(value: u32) -> Self {
        Self::new(value, DurationUnit::Months)
    }

    pub fn years(value: u32) -> Self {
        Self::new(value, DurationUnit::Years)
    }
}

impl ValueObject for WarrantyDuration {}

/// Lifecycle event a warranty window is measured from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyAnchor {
    Purchase,
    Registration,
    Installation,
}

/// Coverage terms of a product, snapshotted onto an item when it is claimed.
///
/// Only anchored variants carry a duration, so "no warranty" can never be
/// paired with a meaningful length.
///
/// Wire shape: `{"anchor": "purchase", "durationValue": 12, "durationUnit": "months"}`
/// or `{"anchor": "no_warranty"}`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "anchor", rename_all = "snake_case")]
pub enum WarrantyPlan {
    #[default]
    NoWarranty,
    Purchase(WarrantyDuration),
    Registration(WarrantyDuration),
    Installation(WarrantyDuration),
}

impl WarrantyPlan {
    pub fn covered(anchor: WarrantyAnchor, duration: WarrantyDuration) -> Self {
        match anchor {
            WarrantyAnchor::Purchase => Self::Purchase(duration),
            WarrantyAnchor::Registration => Self::Registration(duration),
            WarrantyAnchor::Installation => Self::Installation(duration),
        }
    }

    pub fn anchor(&self) -> Option<WarrantyAnchor> {
        match self {
            Self::NoWarranty => None,
            Self::Purchase(_) => Some(WarrantyAnchor::Purchase),
            Self::Registration(_) => Some(WarrantyAnchor::Registration),
            Self::Installation(_) => Some(WarrantyAnchor::Installation),
        }
    }

    pub fn duration(&self) -> Option<WarrantyDuration> {
        match self {
            Self::NoWarranty => None,
            Self::Purchase(d) | Self::Registration(d) | Self::Installation(d) => Some(*d),
        }
    }

    pub fn is_covered(&self) -> bool {
        !matches!(self, Self::NoWarranty)
    }
}

impl ValueObject for WarrantyPlan {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covered_plan_serializes_flat() {
        let plan = WarrantyPlan::Purchase(WarrantyDuration::months(12));
        let json = serde_json::to_value(plan).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"anchor": "purchase", "durationValue": 12, "durationUnit": "months"})
        );
    }

    #[test]
    fn no_warranty_ignores_duration_fields() {
        let plan: WarrantyPlan = serde_json::from_value(serde_json::json!({
            "anchor": "no_warranty",
            "durationValue": 24,
            "durationUnit": "years"
        }))
        .unwrap();
        assert_eq!(plan, WarrantyPlan::NoWarranty);
        assert_eq!(plan.duration(), None);
    }

    #[test]
    fn negative_duration_is_rejected() {
        let res: Result<WarrantyPlan, _> = serde_json::from_value(serde_json::json!({
            "anchor": "installation",
            "durationValue": -1,
            "durationUnit": "days"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn covered_maps_anchor_to_variant() {
        let d = WarrantyDuration::years(2);
        assert_eq!(
            WarrantyPlan::covered(WarrantyAnchor::Registration, d).anchor(),
            Some(WarrantyAnchor::Registration)
        );
    }
}
