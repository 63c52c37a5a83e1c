//! Bus-wide discovery across every relevant peer.

use super::{
    BusUnavailableError, DiscoveryConfig, IntrospectionClient, PeerEnumerator, SubtreeWalker,
};
use crate::discovery::{
    domain::{DiscoveryResult, DiscoveryRunId, InterfaceName, ObjectPath, PeerName},
    ports::BusConnection,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span};

/// Discovers objects exposing an interface across all peers on a bus.
///
/// Each run enumerates peers once, walks every peer from `/` concurrently,
/// and returns once all walks have completed. Results are never cached
/// between runs.
#[derive(Clone)]
pub struct DiscoveryCoordinator<B>
where
    B: BusConnection,
{
    enumerator: PeerEnumerator<B>,
    walker: SubtreeWalker<B>,
}

impl<B> DiscoveryCoordinator<B>
where
    B: BusConnection,
{
    /// Creates a coordinator for `bus` using `config`.
    #[must_use]
    pub fn new(bus: Arc<B>, config: &DiscoveryConfig) -> Self {
        let enumerator = PeerEnumerator::new(Arc::clone(&bus))
            .with_domain_prefix(config.domain_prefix.clone())
            .with_bus_daemon(config.include_bus_daemon)
            .with_call_timeout(config.call_timeout);
        let walker = SubtreeWalker::new(
            IntrospectionClient::new(bus).with_call_timeout(config.call_timeout),
        )
        .with_max_depth(config.max_depth);
        Self { enumerator, walker }
    }

    /// Finds every object on the bus that exposes `interface`.
    ///
    /// Per-object failures shrink the result but never fail the run.
    ///
    /// # Errors
    ///
    /// Returns [`BusUnavailableError`] when the peer list cannot be obtained.
    pub async fn discover(
        &self,
        interface: &InterfaceName,
    ) -> Result<DiscoveryResult, BusUnavailableError> {
        let run_id = DiscoveryRunId::new();
        let span = info_span!("discover", %run_id, %interface);

        async move {
            let peers = self.enumerator.list_peers().await.inspect_err(|err| {
                error!(error = %err, cause = %err.0, "peer enumeration failed");
            })?;
            let result = self.discover_on_peers(&peers, interface).await;
            info!(
                peers = peers.len(),
                matches = result.len(),
                "discovery complete"
            );
            Ok::<_, BusUnavailableError>(result)
        }
        .instrument(span)
        .await
    }

    /// Walks an explicit set of peers, skipping enumeration.
    ///
    /// All peers are walked concurrently from `/`; the call completes once
    /// every walk has. An empty peer list completes immediately.
    pub async fn discover_on_peers(
        &self,
        peers: &[PeerName],
        interface: &InterfaceName,
    ) -> DiscoveryResult {
        let root = ObjectPath::root();
        let root_ref = &root;

        let walks = peers.iter().map(|peer| async move {
            let found = self.walker.walk(peer, root_ref, interface).await;
            debug!(%peer, matches = found.len(), "peer walk complete");
            found
        });

        join_all(walks).await.into_iter().flatten().collect()
    }
}
