//! Warranty expiration arithmetic.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::plan::{DurationUnit, WarrantyDuration, WarrantyPlan};

/// Compute the date a warranty stops covering the item.
///
/// Returns `None` for "no expiration": either the plan carries no warranty or
/// the anchor event has not happened yet. That is distinct from an expired
/// window, which is a date in the past.
///
/// Month and year arithmetic is calendar-aware and clamps the day of month to
/// the last valid day (2024-01-31 + 1 month = 2024-02-29). Results beyond the
/// representable calendar saturate at `NaiveDate::MAX`.
pub fn compute_expiration(plan: &WarrantyPlan, anchor_date: Option<NaiveDate>) -> Option<NaiveDate> {
    let duration = plan.duration()?;
    let anchor = anchor_date?;
    Some(add_duration(anchor, duration))
}

fn add_duration(anchor: NaiveDate, duration: WarrantyDuration) -> NaiveDate {
    let added = match duration.unit {
        DurationUnit::Days => anchor.checked_add_days(Days::new(u64::from(duration.value))),
        DurationUnit::Months => anchor.checked_add_months(Months::new(duration.value)),
        DurationUnit::Years => duration
            .value
            .checked_mul(12)
            .and_then(|months| anchor.checked_add_months(Months::new(months))),
    };
    added.unwrap_or(NaiveDate::MAX)
}

/// Coverage state of an item's warranty on a given day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WarrantyStatus {
    /// The plan carries no warranty at all.
    NoWarranty,
    /// Covered plan whose anchor event has not been recorded yet.
    NotAnchored,
    Active {
        expires_on: NaiveDate,
        days_remaining: i64,
    },
    Expired {
        expired_on: NaiveDate,
    },
}

/// Evaluate a warranty on `today`.
///
/// The expiration date is exclusive: coverage ends at the start of that day,
/// so a zero-length window is already expired on its anchor day.
pub fn warranty_status(
    plan: &WarrantyPlan,
    anchor_date: Option<NaiveDate>,
    today: NaiveDate,
) -> WarrantyStatus {
    if !plan.is_covered() {
        return WarrantyStatus::NoWarranty;
    }

    match compute_expiration(plan, anchor_date) {
        None => WarrantyStatus::NotAnchored,
        Some(expires_on) if expires_on <= today => WarrantyStatus::Expired {
            expired_on: expires_on,
        },
        Some(expires_on) => WarrantyStatus::Active {
            expires_on,
            days_remaining: (expires_on - today).num_days(),
        },
    }
}
