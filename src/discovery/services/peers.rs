//! Peer enumeration with domain filtering.

use crate::discovery::{
    domain::PeerName,
    ports::{BUS_DAEMON_NAME, BusConnection, BusConnectionError},
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// The bus could not be asked for its peer list.
#[derive(Debug, Clone, Error)]
#[error("cannot enumerate bus peers")]
pub struct BusUnavailableError(#[source] pub BusConnectionError);

/// Lists the peers a discovery run should search.
#[derive(Clone)]
pub struct PeerEnumerator<B>
where
    B: BusConnection,
{
    bus: Arc<B>,
    domain_prefix: Option<String>,
    include_bus_daemon: bool,
    call_timeout: Option<Duration>,
}

impl<B> PeerEnumerator<B>
where
    B: BusConnection,
{
    /// Creates an enumerator that keeps every peer except the bus daemon.
    #[must_use]
    pub const fn new(bus: Arc<B>) -> Self {
        Self {
            bus,
            domain_prefix: None,
            include_bus_daemon: false,
            call_timeout: None,
        }
    }

    /// Keeps only peers whose name contains `prefix`.
    #[must_use]
    pub fn with_domain_prefix(mut self, prefix: Option<String>) -> Self {
        self.domain_prefix = prefix;
        self
    }

    /// Controls whether the bus daemon is returned.
    #[must_use]
    pub const fn with_bus_daemon(mut self, include: bool) -> Self {
        self.include_bus_daemon = include;
        self
    }

    /// Bounds the `ListNames` call. `None` waits indefinitely.
    #[must_use]
    pub const fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Returns `true` when `name` passes the configured filter.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        if name == BUS_DAEMON_NAME && !self.include_bus_daemon {
            return false;
        }
        self.domain_prefix
            .as_deref()
            .is_none_or(|prefix| name.contains(prefix))
    }

    /// Lists connected peers that pass the filter, in bus order.
    ///
    /// # Errors
    ///
    /// Returns [`BusUnavailableError`] when the `ListNames` call fails or
    /// does not answer within the call timeout.
    pub async fn list_peers(&self) -> Result<Vec<PeerName>, BusUnavailableError> {
        let listing = self.bus.list_names();
        let names = match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, listing).await.map_err(|_| {
                BusUnavailableError(BusConnectionError::Unavailable(format!(
                    "no ListNames response within {limit:?}"
                )))
            })?,
            None => listing.await,
        }
        .map_err(BusUnavailableError)?;
        let total = names.len();

        let peers: Vec<PeerName> = names
            .into_iter()
            .filter(|name| self.accepts(name))
            .filter_map(|name| PeerName::new(name).ok())
            .collect();

        debug!(
            total,
            kept = peers.len(),
            prefix = self.domain_prefix.as_deref().unwrap_or("*"),
            "filtered bus peers"
        );
        Ok(peers)
    }
}
