//! Port contracts for remote object discovery.

mod bus;
mod proxy;

pub use bus::{BUS_DAEMON_NAME, BusConnection, BusConnectionError, BusConnectionResult};
pub use proxy::{ProxyFactory, ProxyFactoryError, ProxyFactoryResult};
