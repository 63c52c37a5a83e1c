//! Proxy construction port for discovered objects.

use crate::discovery::domain::DiscoveredObject;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for proxy construction.
pub type ProxyFactoryResult<T> = Result<T, ProxyFactoryError>;

/// Builds a usable interface handle for one discovered object.
#[async_trait]
pub trait ProxyFactory: Send + Sync {
    /// Handle type produced for each object.
    type Proxy: Send;

    /// Creates a proxy bound to the object's peer and path.
    async fn create_proxy(&self, object: &DiscoveredObject) -> ProxyFactoryResult<Self::Proxy>;
}

/// Errors returned by proxy factory adapters.
#[derive(Debug, Clone, Error)]
pub enum ProxyFactoryError {
    /// The object no longer exposes the requested interface.
    #[error("object {0} does not expose the proxied interface")]
    InterfaceMissing(DiscoveredObject),

    /// Generic construction failure.
    #[error("proxy construction failed: {0}")]
    Construction(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProxyFactoryError {
    /// Wraps a construction error from the proxy adapter.
    pub fn construction(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Construction(Arc::new(err))
    }
}
