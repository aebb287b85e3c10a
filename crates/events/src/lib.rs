//! Domain events and their distribution mechanics.
//!
//! Events are facts recorded after a state change commits. This crate only
//! defines the envelope and the pub/sub contract; producers and consumers
//! live in the domain and infra crates.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
