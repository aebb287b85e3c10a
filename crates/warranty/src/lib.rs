//! Warranty terms and validity-window arithmetic.
//!
//! Everything here is pure: no clock access, no IO. Callers supply the anchor
//! date and, for status checks, "today".

pub mod calculator;
pub mod plan;

pub use calculator::{WarrantyStatus, compute_expiration, warranty_status};
pub use plan::{DurationUnit, WarrantyAnchor, WarrantyDuration, WarrantyPlan};
