//! Single-object introspection over a bus connection.

use crate::discovery::{
    domain::{IntrospectionResult, MalformedDocumentError, ObjectPath, PeerName},
    ports::{BusConnection, BusConnectionError},
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Why an introspect call produced no usable result.
#[derive(Debug, Clone, Error)]
pub enum IntrospectionFailure {
    /// The remote call itself failed.
    #[error("remote call failed: {0}")]
    Call(BusConnectionError),

    /// No response arrived before the configured deadline.
    #[error("no response within {0:?}")]
    TimedOut(Duration),

    /// The call succeeded but the returned document could not be parsed.
    #[error(transparent)]
    Malformed(MalformedDocumentError),
}

/// A specific object could not be introspected.
#[derive(Debug, Clone, Error)]
#[error("failed to introspect {path} at {peer}: {cause}")]
pub struct RemoteIntrospectionError {
    /// Peer that was called.
    pub peer: PeerName,
    /// Object path that was introspected.
    pub path: ObjectPath,
    /// Underlying failure.
    #[source]
    pub cause: IntrospectionFailure,
}

impl RemoteIntrospectionError {
    /// Returns `true` when the peer answered with an unparseable document.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self.cause, IntrospectionFailure::Malformed(_))
    }
}

/// Issues introspect calls and parses their results.
#[derive(Clone)]
pub struct IntrospectionClient<B>
where
    B: BusConnection,
{
    bus: Arc<B>,
    call_timeout: Option<Duration>,
}

impl<B> IntrospectionClient<B>
where
    B: BusConnection,
{
    /// Creates a client without a call deadline.
    #[must_use]
    pub const fn new(bus: Arc<B>) -> Self {
        Self {
            bus,
            call_timeout: None,
        }
    }

    /// Applies a deadline to every introspect call.
    #[must_use]
    pub const fn with_call_timeout(mut self, call_timeout: Option<Duration>) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Introspects the object at `path` exported by `peer`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteIntrospectionError`] when the call fails, times out,
    /// or yields a malformed document.
    pub async fn introspect(
        &self,
        peer: &PeerName,
        path: &ObjectPath,
    ) -> Result<IntrospectionResult, RemoteIntrospectionError> {
        let fail = |cause| RemoteIntrospectionError {
            peer: peer.clone(),
            path: path.clone(),
            cause,
        };

        let call = self.bus.introspect(peer, path);
        let response = match self.call_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| fail(IntrospectionFailure::TimedOut(limit)))?,
            None => call.await,
        };
        let document = response.map_err(|err| fail(IntrospectionFailure::Call(err)))?;

        IntrospectionResult::parse(&document)
            .map_err(|err| fail(IntrospectionFailure::Malformed(err)))
    }
}
