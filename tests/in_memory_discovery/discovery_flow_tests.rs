//! Discovery flow tests against an [`InMemoryBus`].
//!
//! Covers peer filtering, nested matches and aggregation across peers.

use crate::in_memory_discovery::helpers::{
    CONTENT_INTERFACE, TestResult, bus, content_interface, coordinator, export_object, rendered,
    runtime,
};
use busscout::discovery::{
    adapters::memory::InMemoryBus,
    domain::{InterfaceName, ObjectPath, PeerName},
    services::{DiscoveryConfig, DiscoveryCoordinator},
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Only peers carrying the domain marker are searched.
#[rstest]
fn prefix_filter_limits_search(
    runtime: io::Result<Runtime>,
    bus: Arc<InMemoryBus>,
    content_interface: InterfaceName,
) -> TestResult {
    let rt = runtime?;
    export_object(&bus, "endlessm.App1", "/com", &[CONTENT_INTERFACE])?;
    export_object(&bus, "other.App2", "/com", &[CONTENT_INTERFACE])?;

    let result = rt.block_on(coordinator(&bus).discover(&content_interface))?;

    assert_eq!(rendered(&result), vec!["endlessm.App1:/com"]);
    Ok(())
}

/// A custom prefix selects a different search domain.
#[rstest]
fn custom_prefix_selects_other_domain(
    runtime: io::Result<Runtime>,
    bus: Arc<InMemoryBus>,
    content_interface: InterfaceName,
) -> TestResult {
    let rt = runtime?;
    export_object(&bus, "endlessm.App1", "/com", &[CONTENT_INTERFACE])?;
    export_object(&bus, "org.gnome.App2", "/org/gnome", &[CONTENT_INTERFACE])?;
    let config = DiscoveryConfig::default().with_domain_prefix("gnome");
    let service = DiscoveryCoordinator::new(Arc::clone(&bus), &config);

    let result = rt.block_on(service.discover(&content_interface))?;

    assert_eq!(rendered(&result), vec!["org.gnome.App2:/org/gnome"]);
    Ok(())
}

/// Matches anywhere in a deep tree are found, across several peers.
#[rstest]
fn nested_matches_across_peers(
    runtime: io::Result<Runtime>,
    bus: Arc<InMemoryBus>,
    content_interface: InterfaceName,
) -> TestResult {
    let rt = runtime?;
    export_object(
        &bus,
        "com.endlessm.Encyclopedia",
        "/com/endlessm/Encyclopedia/Content",
        &[CONTENT_INTERFACE, "org.freedesktop.DBus.Properties"],
    )?;
    export_object(
        &bus,
        "com.endlessm.Encyclopedia",
        "/com/endlessm/Encyclopedia/Search",
        &["com.endlessm.Search"],
    )?;
    export_object(&bus, "com.endlessm.Travel", "/", &[CONTENT_INTERFACE])?;
    export_object(
        &bus,
        "com.endlessm.Travel",
        "/com/endlessm/Travel",
        &[CONTENT_INTERFACE],
    )?;
    export_object(&bus, "com.endlessm.Empty", "/com/endlessm/Empty", &[])?;

    let result = rt.block_on(coordinator(&bus).discover(&content_interface))?;

    assert_eq!(
        rendered(&result),
        vec![
            "com.endlessm.Encyclopedia:/com/endlessm/Encyclopedia/Content",
            "com.endlessm.Travel:/",
            "com.endlessm.Travel:/com/endlessm/Travel",
        ]
    );
    Ok(())
}

/// An interface nobody exports yields an empty result, not an error.
#[rstest]
fn unknown_interface_yields_empty_result(
    runtime: io::Result<Runtime>,
    bus: Arc<InMemoryBus>,
) -> TestResult {
    let rt = runtime?;
    export_object(&bus, "com.endlessm.App", "/com", &[CONTENT_INTERFACE])?;
    let missing = InterfaceName::new("com.endlessm.Missing")?;

    let result = rt.block_on(coordinator(&bus).discover(&missing))?;

    assert!(result.is_empty());
    Ok(())
}

/// Interface matching is exact: a prefix of the name does not match.
#[rstest]
fn interface_match_is_exact(runtime: io::Result<Runtime>, bus: Arc<InMemoryBus>) -> TestResult {
    let rt = runtime?;
    export_object(&bus, "com.endlessm.App", "/com", &[CONTENT_INTERFACE])?;
    let prefix_only = InterfaceName::new("com.endlessm.GrandCentral")?;

    let result = rt.block_on(coordinator(&bus).discover(&prefix_only))?;

    assert!(result.is_empty());
    Ok(())
}

/// Every reported path lies under the walk root of its peer.
#[rstest]
fn discovered_paths_descend_from_root(
    runtime: io::Result<Runtime>,
    bus: Arc<InMemoryBus>,
    content_interface: InterfaceName,
) -> TestResult {
    let rt = runtime?;
    export_object(&bus, "com.endlessm.A", "/a/b", &[CONTENT_INTERFACE])?;
    export_object(&bus, "com.endlessm.A", "/c", &[CONTENT_INTERFACE])?;
    let peer = PeerName::new("com.endlessm.A")?;

    let result = rt.block_on(coordinator(&bus).discover(&content_interface))?;

    assert_eq!(result.for_peer(&peer).count(), 2);
    assert!(
        result
            .iter()
            .all(|object| object.path().is_within(&ObjectPath::root()))
    );
    Ok(())
}
