//! Validated peer and interface name types.

use super::DiscoveryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a peer connected to the bus.
///
/// Peer names are opaque: the only validation is that they are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeerName(String);

impl PeerName {
    /// Creates a peer name.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError::EmptyPeerName`] when the value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, DiscoveryDomainError> {
        let name = value.into();
        if name.is_empty() {
            return Err(DiscoveryDomainError::EmptyPeerName);
        }
        Ok(Self(name))
    }

    /// Returns the peer name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PeerName {
    type Error = DiscoveryDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PeerName> for String {
    fn from(value: PeerName) -> Self {
        value.0
    }
}

impl AsRef<str> for PeerName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PeerName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Name of an interface a remote object may expose.
///
/// Interface names compare by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InterfaceName(String);

impl InterfaceName {
    /// Creates an interface name.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError::EmptyInterfaceName`] when the value is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, DiscoveryDomainError> {
        let name = value.into();
        if name.is_empty() {
            return Err(DiscoveryDomainError::EmptyInterfaceName);
        }
        Ok(Self(name))
    }

    /// Returns the interface name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for InterfaceName {
    type Error = DiscoveryDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InterfaceName> for String {
    fn from(value: InterfaceName) -> Self {
        value.0
    }
}

impl AsRef<str> for InterfaceName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
