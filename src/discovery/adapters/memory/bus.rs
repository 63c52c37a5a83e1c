//! In-memory bus connection adapter.

use crate::discovery::{
    domain::{ObjectPath, PeerName},
    ports::{BUS_DAEMON_NAME, BusConnection, BusConnectionError, BusConnectionResult},
};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

type ObjectKey = (PeerName, ObjectPath);

/// In-memory bus connection adapter.
///
/// Peers export object trees held in memory and introspection documents are
/// rendered on demand. Individual introspect calls can be made to fail,
/// return a hand-written document, or respond after a delay, which makes the
/// adapter suitable for exercising partial failure and join behaviour.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBus {
    state: Arc<RwLock<InMemoryBusState>>,
    introspect_calls: Arc<AtomicUsize>,
}

#[derive(Debug, Default)]
struct InMemoryBusState {
    unavailable: bool,
    listing_delay: Option<Duration>,
    extra_names: BTreeSet<String>,
    peers: BTreeMap<PeerName, BTreeMap<ObjectPath, BTreeSet<String>>>,
    failing: HashSet<ObjectKey>,
    documents: HashMap<ObjectKey, String>,
    delays: HashMap<ObjectKey, Duration>,
}

impl InMemoryBus {
    /// Creates an empty in-memory bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write_state(&self) -> BusConnectionResult<RwLockWriteGuard<'_, InMemoryBusState>> {
        self.state
            .write()
            .map_err(|err| BusConnectionError::transport(std::io::Error::other(err.to_string())))
    }

    fn read_state(&self) -> BusConnectionResult<RwLockReadGuard<'_, InMemoryBusState>> {
        self.state
            .read()
            .map_err(|err| BusConnectionError::transport(std::io::Error::other(err.to_string())))
    }

    /// Connects a peer exporting only the root object.
    ///
    /// # Errors
    ///
    /// Returns bus transport errors when lock acquisition fails.
    pub fn add_peer(&self, peer: &PeerName) -> BusConnectionResult<()> {
        let mut state = self.write_state()?;
        state
            .peers
            .entry(peer.clone())
            .or_default()
            .entry(ObjectPath::root())
            .or_default();
        Ok(())
    }

    /// Adds a name to `ListNames` output that exports no objects.
    ///
    /// # Errors
    ///
    /// Returns bus transport errors when lock acquisition fails.
    pub fn add_name(&self, name: impl Into<String>) -> BusConnectionResult<()> {
        self.write_state()?.extra_names.insert(name.into());
        Ok(())
    }

    /// Exports an object exposing `interfaces` at `path` on `peer`.
    ///
    /// The peer is connected if needed, and every ancestor of `path` is
    /// exported as well so that it appears during introspection. Interfaces
    /// are added to any already exported at the path.
    ///
    /// # Errors
    ///
    /// Returns bus transport errors when lock acquisition fails.
    pub fn add_object<I, S>(
        &self,
        peer: &PeerName,
        path: &ObjectPath,
        interfaces: I,
    ) -> BusConnectionResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.write_state()?;
        let tree = state.peers.entry(peer.clone()).or_default();
        for ancestor in ancestors(path) {
            tree.entry(ancestor).or_default();
        }
        tree.entry(path.clone())
            .or_default()
            .extend(interfaces.into_iter().map(Into::into));
        Ok(())
    }

    /// Makes every introspect call on `path` at `peer` fail.
    ///
    /// # Errors
    ///
    /// Returns bus transport errors when lock acquisition fails.
    pub fn fail_introspection(
        &self,
        peer: &PeerName,
        path: &ObjectPath,
    ) -> BusConnectionResult<()> {
        self.write_state()?
            .failing
            .insert((peer.clone(), path.clone()));
        Ok(())
    }

    /// Replaces the rendered introspection document for `path` at `peer`.
    ///
    /// # Errors
    ///
    /// Returns bus transport errors when lock acquisition fails.
    pub fn set_document(
        &self,
        peer: &PeerName,
        path: &ObjectPath,
        document: impl Into<String>,
    ) -> BusConnectionResult<()> {
        self.write_state()?
            .documents
            .insert((peer.clone(), path.clone()), document.into());
        Ok(())
    }

    /// Delays every introspect response for `path` at `peer`.
    ///
    /// # Errors
    ///
    /// Returns bus transport errors when lock acquisition fails.
    pub fn delay_introspection(
        &self,
        peer: &PeerName,
        path: &ObjectPath,
        delay: Duration,
    ) -> BusConnectionResult<()> {
        self.write_state()?
            .delays
            .insert((peer.clone(), path.clone()), delay);
        Ok(())
    }

    /// Delays every `ListNames` response.
    ///
    /// # Errors
    ///
    /// Returns bus transport errors when lock acquisition fails.
    pub fn delay_listing(&self, delay: Duration) -> BusConnectionResult<()> {
        self.write_state()?.listing_delay = Some(delay);
        Ok(())
    }

    /// Marks the whole bus as reachable or unreachable.
    ///
    /// # Errors
    ///
    /// Returns bus transport errors when lock acquisition fails.
    pub fn set_unavailable(&self, unavailable: bool) -> BusConnectionResult<()> {
        self.write_state()?.unavailable = unavailable;
        Ok(())
    }

    /// Number of introspect calls received so far.
    #[must_use]
    pub fn introspection_count(&self) -> usize {
        self.introspect_calls.load(Ordering::SeqCst)
    }

    fn document_for(&self, peer: &PeerName, path: &ObjectPath) -> BusConnectionResult<String> {
        let state = self.read_state()?;
        if state.unavailable {
            return Err(BusConnectionError::Unavailable(
                "in-memory bus marked unavailable".to_owned(),
            ));
        }

        let key = (peer.clone(), path.clone());
        if state.failing.contains(&key) {
            return Err(BusConnectionError::transport(std::io::Error::other(format!(
                "introspection of {path} at {peer} rejected"
            ))));
        }
        if let Some(document) = state.documents.get(&key) {
            return Ok(document.clone());
        }

        let tree = state
            .peers
            .get(peer)
            .ok_or_else(|| BusConnectionError::NoSuchPeer(peer.clone()))?;
        let interfaces = tree.get(path).ok_or_else(|| BusConnectionError::NoSuchObject {
            peer: peer.clone(),
            path: path.clone(),
        })?;
        let children = tree
            .keys()
            .filter_map(|candidate| direct_child_segment(path, candidate));
        Ok(render_document(interfaces, children))
    }
}

#[async_trait]
impl BusConnection for InMemoryBus {
    async fn list_names(&self) -> BusConnectionResult<Vec<String>> {
        let delay = self.read_state()?.listing_delay;
        if let Some(duration) = delay {
            tokio::time::sleep(duration).await;
        }
        let state = self.read_state()?;
        if state.unavailable {
            return Err(BusConnectionError::Unavailable(
                "in-memory bus marked unavailable".to_owned(),
            ));
        }

        let mut names = vec![BUS_DAEMON_NAME.to_owned()];
        names.extend(state.peers.keys().map(|peer| peer.as_str().to_owned()));
        names.extend(state.extra_names.iter().cloned());
        Ok(names)
    }

    async fn introspect(&self, peer: &PeerName, path: &ObjectPath) -> BusConnectionResult<String> {
        self.introspect_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self
            .read_state()?
            .delays
            .get(&(peer.clone(), path.clone()))
            .copied();
        if let Some(duration) = delay {
            tokio::time::sleep(duration).await;
        }
        self.document_for(peer, path)
    }
}

fn ancestors(path: &ObjectPath) -> Vec<ObjectPath> {
    let segments: Vec<&str> = path
        .as_str()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    let parent_depth = segments.len().saturating_sub(1);

    let mut result = vec![ObjectPath::root()];
    for segment in segments.into_iter().take(parent_depth) {
        let Some(next) = result.last().and_then(|parent| parent.child(segment).ok()) else {
            break;
        };
        result.push(next);
    }
    result
}

fn direct_child_segment<'a>(parent: &ObjectPath, candidate: &'a ObjectPath) -> Option<&'a str> {
    if candidate == parent || !candidate.is_within(parent) {
        return None;
    }
    let rest = if parent.is_root() {
        candidate.as_str().strip_prefix('/')?
    } else {
        candidate
            .as_str()
            .strip_prefix(parent.as_str())?
            .strip_prefix('/')?
    };
    (!rest.contains('/')).then_some(rest)
}

fn render_document<'a>(
    interfaces: &BTreeSet<String>,
    children: impl Iterator<Item = &'a str>,
) -> String {
    let mut document = String::from("<node>");
    for interface in interfaces {
        document.push_str(&format!("<interface name=\"{}\"/>", escape(interface)));
    }
    for child in children {
        document.push_str(&format!("<node name=\"{}\"/>", escape(child)));
    }
    document.push_str("</node>");
    document
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
