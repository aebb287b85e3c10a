//! Value object trait: equality by value, not identity.

/// Marker trait for immutable values compared by their attributes.
///
/// Warranty terms and product summaries are value objects: an item holds a
/// snapshot of them, and two snapshots with equal fields are interchangeable.
/// To "modify" a value object, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
