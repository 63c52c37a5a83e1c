//! Graceful degradation tests against an [`InMemoryBus`].
//!
//! Per-object failures shrink the result; only a bus outage fails discovery.

use crate::in_memory_discovery::helpers::{
    CONTENT_INTERFACE, TestResult, bus, content_interface, coordinator, export_object, rendered,
    runtime,
};
use busscout::discovery::{
    adapters::memory::InMemoryBus,
    domain::{InterfaceName, ObjectPath, PeerName},
    services::{BusUnavailableError, DiscoveryConfig, DiscoveryCoordinator},
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// A single failing object hides only its own subtree.
#[rstest]
fn failing_object_hides_only_its_subtree(
    runtime: io::Result<Runtime>,
    bus: Arc<InMemoryBus>,
    content_interface: InterfaceName,
) -> TestResult {
    let rt = runtime?;
    export_object(&bus, "com.endlessm.A", "/com", &[CONTENT_INTERFACE])?;
    export_object(&bus, "com.endlessm.A", "/com/flaky", &[CONTENT_INTERFACE])?;
    export_object(
        &bus,
        "com.endlessm.A",
        "/com/flaky/Child",
        &[CONTENT_INTERFACE],
    )?;
    export_object(&bus, "com.endlessm.A", "/com/steady", &[CONTENT_INTERFACE])?;
    export_object(&bus, "com.endlessm.B", "/b", &[CONTENT_INTERFACE])?;
    bus.fail_introspection(
        &PeerName::new("com.endlessm.A")?,
        &ObjectPath::new("/com/flaky")?,
    )?;

    let result = rt.block_on(coordinator(&bus).discover(&content_interface))?;

    assert_eq!(
        rendered(&result),
        vec![
            "com.endlessm.A:/com",
            "com.endlessm.A:/com/steady",
            "com.endlessm.B:/b",
        ]
    );
    Ok(())
}

/// A peer that vanished after enumeration contributes nothing.
#[rstest]
fn vanished_peer_contributes_nothing(
    runtime: io::Result<Runtime>,
    bus: Arc<InMemoryBus>,
    content_interface: InterfaceName,
) -> TestResult {
    let rt = runtime?;
    export_object(&bus, "com.endlessm.A", "/a", &[CONTENT_INTERFACE])?;
    bus.add_name("com.endlessm.Gone")?;

    let result = rt.block_on(coordinator(&bus).discover(&content_interface))?;

    assert_eq!(rendered(&result), vec!["com.endlessm.A:/a"]);
    Ok(())
}

/// A hung peer is abandoned once the per-call deadline expires.
#[rstest]
fn call_timeout_abandons_hung_peer(
    runtime: io::Result<Runtime>,
    bus: Arc<InMemoryBus>,
    content_interface: InterfaceName,
) -> TestResult {
    let rt = runtime?;
    export_object(&bus, "com.endlessm.Hung", "/h", &[CONTENT_INTERFACE])?;
    export_object(&bus, "com.endlessm.Ok", "/o", &[CONTENT_INTERFACE])?;
    bus.delay_introspection(
        &PeerName::new("com.endlessm.Hung")?,
        &ObjectPath::new("/h")?,
        Duration::from_secs(30),
    )?;
    let config = DiscoveryConfig::default().with_call_timeout(Duration::from_millis(40));
    let service = DiscoveryCoordinator::new(Arc::clone(&bus), &config);

    let result = rt.block_on(service.discover(&content_interface))?;

    assert_eq!(rendered(&result), vec!["com.endlessm.Ok:/o"]);
    Ok(())
}

/// An unreachable bus fails the whole run.
#[rstest]
fn unreachable_bus_is_fatal(
    runtime: io::Result<Runtime>,
    bus: Arc<InMemoryBus>,
    content_interface: InterfaceName,
) -> TestResult {
    let rt = runtime?;
    export_object(&bus, "com.endlessm.A", "/a", &[CONTENT_INTERFACE])?;
    bus.set_unavailable(true)?;

    let result = rt.block_on(coordinator(&bus).discover(&content_interface));

    assert!(matches!(result, Err(BusUnavailableError(_))));
    Ok(())
}
