//! In-memory adapters for discovery ports.

mod bus;

pub use bus::InMemoryBus;
