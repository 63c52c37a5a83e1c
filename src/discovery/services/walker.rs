//! Recursive, concurrent exploration of one peer's object tree.

use super::IntrospectionClient;
use crate::discovery::{
    domain::{DiscoveredObject, InterfaceName, ObjectPath, PeerName},
    ports::BusConnection,
};
use futures::future::{BoxFuture, FutureExt, join_all};
use tracing::{debug, warn};

/// Walks a peer's object namespace looking for an interface.
///
/// Every node is introspected once. All children of a node are walked
/// concurrently and the node completes only after each of them has, so a
/// slow or hung branch delays its ancestors but never its siblings.
/// Introspection failures are logged and the failing subtree contributes
/// nothing.
#[derive(Clone)]
pub struct SubtreeWalker<B>
where
    B: BusConnection,
{
    client: IntrospectionClient<B>,
    max_depth: Option<usize>,
}

impl<B> SubtreeWalker<B>
where
    B: BusConnection,
{
    /// Creates a walker with no depth limit.
    #[must_use]
    pub const fn new(client: IntrospectionClient<B>) -> Self {
        Self {
            client,
            max_depth: None,
        }
    }

    /// Stops expanding children more than `max_depth` levels below the root.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns every object at or below `root` on `peer` that exposes
    /// `interface`.
    ///
    /// Matching is not terminal: a matching object's children are still
    /// explored.
    pub async fn walk(
        &self,
        peer: &PeerName,
        root: &ObjectPath,
        interface: &InterfaceName,
    ) -> Vec<DiscoveredObject> {
        self.walk_node(peer, root.clone(), interface, 0).await
    }

    fn walk_node<'a>(
        &'a self,
        peer: &'a PeerName,
        path: ObjectPath,
        interface: &'a InterfaceName,
        depth: usize,
    ) -> BoxFuture<'a, Vec<DiscoveredObject>> {
        async move {
            let node = match self.client.introspect(peer, &path).await {
                Ok(node) => node,
                Err(err) => {
                    warn!(%peer, %path, error = %err, "skipping unreadable subtree");
                    return Vec::new();
                }
            };

            debug!(%peer, %path, children = node.children().len(), "introspected object");

            let mut discovered = Vec::new();
            if node.has_interface(interface) {
                debug!(%peer, %path, %interface, "found matching object");
                discovered.push(DiscoveredObject::new(peer.clone(), path.clone()));
            }

            if node.is_leaf() {
                return discovered;
            }
            if self.max_depth.is_some_and(|limit| depth >= limit) {
                warn!(
                    %peer,
                    %path,
                    depth,
                    children = node.children().len(),
                    "depth limit reached; children not explored"
                );
                return discovered;
            }

            let child_walks = node
                .children()
                .iter()
                .filter_map(|segment| match path.child(segment) {
                    Ok(child) => Some(child),
                    Err(err) => {
                        warn!(%peer, %path, error = %err, "ignoring invalid child node");
                        None
                    }
                })
                .map(|child| self.walk_node(peer, child, interface, depth + 1));

            for child_result in join_all(child_walks).await {
                discovered.extend(child_result);
            }
            discovered
        }
        .boxed()
    }
}
