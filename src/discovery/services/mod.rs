//! Application services for remote object discovery.

mod config;
mod coordinator;
mod introspection;
mod peers;
mod proxies;
mod walker;

pub use config::{DEFAULT_DOMAIN_PREFIX, DEFAULT_MAX_DEPTH, DiscoveryConfig, DiscoveryConfigError};
pub use coordinator::DiscoveryCoordinator;
pub use introspection::{IntrospectionClient, IntrospectionFailure, RemoteIntrospectionError};
pub use peers::{BusUnavailableError, PeerEnumerator};
pub use proxies::ProxyBuilder;
pub use walker::SubtreeWalker;
