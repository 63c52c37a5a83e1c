//! Discovered objects and aggregated discovery results.

use super::{ObjectPath, PeerName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// A remote object that exposes the interface a discovery run searched for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiscoveredObject {
    peer: PeerName,
    path: ObjectPath,
}

impl DiscoveredObject {
    /// Creates a discovered object.
    #[must_use]
    pub const fn new(peer: PeerName, path: ObjectPath) -> Self {
        Self { peer, path }
    }

    /// Peer that exports the object.
    #[must_use]
    pub const fn peer(&self) -> &PeerName {
        &self.peer
    }

    /// Object path within the peer's namespace.
    #[must_use]
    pub const fn path(&self) -> &ObjectPath {
        &self.path
    }
}

impl fmt::Display for DiscoveredObject {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.peer, self.path)
    }
}

/// Every object found by one discovery run.
///
/// Ordering carries no meaning; use [`DiscoveryResult::contains`] or compare
/// [`DiscoveryResult::to_set`] rather than the raw sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscoveryResult(Vec<DiscoveredObject>);

impl DiscoveryResult {
    /// Creates an empty result.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of discovered objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing was discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the discovered objects.
    pub fn iter(&self) -> std::slice::Iter<'_, DiscoveredObject> {
        self.0.iter()
    }

    /// Returns `true` when `peer` exports a matching object at `path`.
    #[must_use]
    pub fn contains(&self, peer: &PeerName, path: &ObjectPath) -> bool {
        self.0
            .iter()
            .any(|object| object.peer() == peer && object.path() == path)
    }

    /// Matching objects exported by `peer`.
    pub fn for_peer<'a>(
        &'a self,
        peer: &'a PeerName,
    ) -> impl Iterator<Item = &'a DiscoveredObject> + 'a {
        self.0.iter().filter(move |object| object.peer() == peer)
    }

    /// Distinct peers that contributed at least one object.
    #[must_use]
    pub fn peers(&self) -> BTreeSet<&PeerName> {
        self.0.iter().map(DiscoveredObject::peer).collect()
    }

    /// Returns the result as an order-independent set.
    #[must_use]
    pub fn to_set(&self) -> BTreeSet<DiscoveredObject> {
        self.0.iter().cloned().collect()
    }

    /// Consumes the result, returning the discovered objects.
    #[must_use]
    pub fn into_vec(self) -> Vec<DiscoveredObject> {
        self.0
    }
}

impl From<Vec<DiscoveredObject>> for DiscoveryResult {
    fn from(objects: Vec<DiscoveredObject>) -> Self {
        Self(objects)
    }
}

impl FromIterator<DiscoveredObject> for DiscoveryResult {
    fn from_iter<I: IntoIterator<Item = DiscoveredObject>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<DiscoveredObject> for DiscoveryResult {
    fn extend<I: IntoIterator<Item = DiscoveredObject>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for DiscoveryResult {
    type Item = DiscoveredObject;
    type IntoIter = std::vec::IntoIter<DiscoveredObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiscoveryResult {
    type Item = &'a DiscoveredObject;
    type IntoIter = std::slice::Iter<'a, DiscoveredObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Identifier attached to the log span of one discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscoveryRunId(Uuid);

impl DiscoveryRunId {
    /// Creates a new random run identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DiscoveryRunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DiscoveryRunId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
