//! Shared world state for object discovery BDD scenarios.

use std::sync::Arc;

use busscout::discovery::{
    adapters::memory::InMemoryBus,
    domain::{DiscoveryResult, InterfaceName, ObjectPath, PeerName},
    services::BusUnavailableError,
};
use rstest::fixture;

/// Interface every scenario searches for.
pub const TARGET_INTERFACE: &str = "com.endlessm.GrandCentralContent";

/// Scenario world for object discovery behaviour tests.
pub struct DiscoveryWorld {
    /// Bus the scenario populates and discovers against.
    pub bus: Arc<InMemoryBus>,
    /// Result of the last discovery run.
    pub last_result: Option<Result<DiscoveryResult, BusUnavailableError>>,
}

impl DiscoveryWorld {
    /// Creates a world with an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bus: Arc::new(InMemoryBus::new()),
            last_result: None,
        }
    }

    /// Returns the last successful discovery result.
    ///
    /// # Errors
    ///
    /// Returns an error when discovery has not run or failed.
    pub fn discovered(&self) -> Result<&DiscoveryResult, eyre::Report> {
        match self.last_result.as_ref() {
            Some(Ok(result)) => Ok(result),
            Some(Err(err)) => Err(eyre::eyre!("discovery failed: {err}")),
            None => Err(eyre::eyre!("discovery has not run in this scenario")),
        }
    }
}

impl Default for DiscoveryWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DiscoveryWorld {
    DiscoveryWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a peer name and object path from step arguments.
///
/// # Errors
///
/// Returns an error when either value is invalid.
pub fn parse_target(peer: &str, path: &str) -> Result<(PeerName, ObjectPath), eyre::Report> {
    let peer_name = PeerName::new(peer).map_err(|err| eyre::eyre!("invalid peer: {err}"))?;
    let object_path = ObjectPath::new(path).map_err(|err| eyre::eyre!("invalid path: {err}"))?;
    Ok((peer_name, object_path))
}

/// Returns the interface every scenario searches for.
///
/// # Errors
///
/// Returns an error if the constant interface name is rejected.
pub fn target_interface() -> Result<InterfaceName, eyre::Report> {
    InterfaceName::new(TARGET_INTERFACE).map_err(|err| eyre::eyre!("invalid interface: {err}"))
}
