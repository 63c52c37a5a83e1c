//! Busscout: discovery of remote objects on a message bus.
//!
//! Given a live bus connection, this crate finds every object, across every
//! relevant peer, that exposes a target interface. Each peer's exported object
//! tree is introspected recursively, with all children of a node explored
//! concurrently and joined before the node completes.
//!
//! # Architecture
//!
//! Busscout follows hexagonal architecture principles:
//!
//! - **Domain**: Names, object paths, and parsed introspection documents
//! - **Ports**: Abstract trait interfaces for the bus and proxy construction
//! - **Adapters**: Concrete implementations of ports (an in-memory bus)
//! - **Services**: Introspection, peer enumeration, tree walking, and
//!   bus-wide coordination
//!
//! # Modules
//!
//! - [`discovery`]: Remote object discovery
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use busscout::discovery::{
//!     adapters::memory::InMemoryBus,
//!     domain::{InterfaceName, ObjectPath, PeerName},
//!     services::{DiscoveryConfig, DiscoveryCoordinator},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bus = Arc::new(InMemoryBus::new());
//! let peer = PeerName::new("com.endlessm.Encyclopedia")?;
//! bus.add_object(&peer, &ObjectPath::new("/com/endlessm/Content")?, [
//!     "com.endlessm.GrandCentralContent",
//! ])?;
//!
//! let coordinator = DiscoveryCoordinator::new(bus, &DiscoveryConfig::default());
//! let interface = InterfaceName::new("com.endlessm.GrandCentralContent")?;
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_all()
//!     .build()?;
//! let found = runtime.block_on(coordinator.discover(&interface))?;
//!
//! assert_eq!(found.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod discovery;
