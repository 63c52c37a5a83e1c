//! Bus connection port for peer enumeration and object introspection.

use crate::discovery::domain::{ObjectPath, PeerName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Well-known name of the bus daemon.
pub const BUS_DAEMON_NAME: &str = "org.freedesktop.DBus";

/// Result type for bus connection operations.
pub type BusConnectionResult<T> = Result<T, BusConnectionError>;

/// Remote calls the discovery engine issues against a live bus connection.
///
/// Implementations must not block the calling thread; every call suspends
/// only the awaiting future.
#[async_trait]
pub trait BusConnection: Send + Sync {
    /// Calls `ListNames` on the bus daemon and returns every connected peer
    /// name, unfiltered.
    async fn list_names(&self) -> BusConnectionResult<Vec<String>>;

    /// Calls `Introspect` on `path` at `peer` and returns the raw document.
    async fn introspect(&self, peer: &PeerName, path: &ObjectPath) -> BusConnectionResult<String>;
}

/// Errors returned by bus connection adapters.
#[derive(Debug, Clone, Error)]
pub enum BusConnectionError {
    /// The bus itself cannot be reached.
    #[error("bus unavailable: {0}")]
    Unavailable(String),

    /// The named peer is not connected.
    #[error("no such peer {0}")]
    NoSuchPeer(PeerName),

    /// The peer does not export an object at the path.
    #[error("peer {peer} exports no object at {path}")]
    NoSuchObject {
        /// Peer that was called.
        peer: PeerName,
        /// Requested object path.
        path: ObjectPath,
    },

    /// Generic transport failure.
    #[error("bus transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl BusConnectionError {
    /// Wraps a transport error from the bus adapter.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
