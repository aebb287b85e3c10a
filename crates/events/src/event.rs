use chrono::{DateTime, Utc};

/// A fact recorded after a state change commits.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable dotted name, e.g. `inventory.item.ownership_claimed`.
    fn event_type(&self) -> &'static str;

    /// Payload schema revision; bumped when a field changes meaning.
    fn schema_version(&self) -> u32 {
        1
    }

    /// Business time of the change (not the time it was published).
    fn occurred_at(&self) -> DateTime<Utc>;
}
