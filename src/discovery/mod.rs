//! Discovery of remote objects exposing a given interface.
//!
//! A discovery run lists the peers connected to a bus, then recursively
//! introspects each peer's exported object tree from `/`, fanning out over
//! every child node concurrently and joining the results. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
