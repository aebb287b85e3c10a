use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use claimtrack_core::AggregateId;

use crate::event::Event;

/// A committed event plus the stream metadata consumers route on.
///
/// `sequence_number` is the aggregate version reached by applying the
/// payload. Per stream the numbers are contiguous from 1, so a consumer can
/// spot gaps and replays with [`EventEnvelope::follows`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    aggregate_id: AggregateId,
    aggregate_type: String,
    sequence_number: u64,
    event_type: String,
    schema_version: u32,
    occurred_at: DateTime<Utc>,
    payload: E,
}

impl<E: Event> EventEnvelope<E> {
    /// Seal a payload; type, schema revision and business time are read off it.
    pub fn new(
        event_id: Uuid,
        aggregate_id: AggregateId,
        aggregate_type: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            aggregate_id,
            aggregate_type: aggregate_type.into(),
            sequence_number,
            event_type: payload.event_type().to_string(),
            schema_version: payload.schema_version(),
            occurred_at: payload.occurred_at(),
            payload,
        }
    }
}

impl<E> EventEnvelope<E> {
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn aggregate_id(&self) -> AggregateId {
        self.aggregate_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }

    /// Whether this envelope is the direct successor of `previous` in one stream.
    pub fn follows<P>(&self, previous: &EventEnvelope<P>) -> bool {
        self.aggregate_id == previous.aggregate_id
            && self.aggregate_type == previous.aggregate_type
            && self.sequence_number == previous.sequence_number + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Pinged(DateTime<Utc>);

    impl Event for Pinged {
        fn event_type(&self) -> &'static str {
            "test.pinged"
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn metadata_is_read_off_the_payload() {
        let at = Utc::now();
        let env = EventEnvelope::new(Uuid::now_v7(), AggregateId::new(), "test", 1, Pinged(at));
        assert_eq!(env.event_type(), "test.pinged");
        assert_eq!(env.schema_version(), 1);
        assert_eq!(env.occurred_at(), at);
    }

    #[test]
    fn follows_requires_same_stream_and_next_sequence() {
        let id = AggregateId::new();
        let now = Utc::now();
        let first = EventEnvelope::new(Uuid::now_v7(), id, "test", 1, Pinged(now));
        let second = EventEnvelope::new(Uuid::now_v7(), id, "test", 2, Pinged(now));
        let replay = EventEnvelope::new(Uuid::now_v7(), id, "test", 1, Pinged(now));
        let other = EventEnvelope::new(Uuid::now_v7(), AggregateId::new(), "test", 2, Pinged(now));

        assert!(second.follows(&first));
        assert!(!replay.follows(&first));
        assert!(!other.follows(&first));
    }
}
