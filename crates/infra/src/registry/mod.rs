//! Inventory registry adapters.

pub mod in_memory;
pub mod publishing;

pub use in_memory::InMemoryInventoryRegistry;
pub use publishing::PublishingInventoryRegistry;
