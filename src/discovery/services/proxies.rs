//! Proxy construction for discovery results.

use crate::discovery::{domain::DiscoveryResult, ports::ProxyFactory};
use futures::future::join_all;
use std::sync::Arc;
use tracing::warn;

/// Turns discovered objects into interface proxies.
#[derive(Clone)]
pub struct ProxyBuilder<F>
where
    F: ProxyFactory,
{
    factory: Arc<F>,
}

impl<F> ProxyBuilder<F>
where
    F: ProxyFactory,
{
    /// Creates a builder around `factory`.
    #[must_use]
    pub const fn new(factory: Arc<F>) -> Self {
        Self { factory }
    }

    /// Builds one proxy per discovered object, concurrently.
    ///
    /// Objects whose proxy cannot be built are logged and left out; the
    /// remaining proxies keep the order of `objects`.
    pub async fn build_all(&self, objects: &DiscoveryResult) -> Vec<F::Proxy> {
        let builds = objects.iter().map(|object| async move {
            match self.factory.create_proxy(object).await {
                Ok(proxy) => Some(proxy),
                Err(err) => {
                    warn!(%object, error = %err, "could not create proxy");
                    None
                }
            }
        });

        join_all(builds).await.into_iter().flatten().collect()
    }
}
