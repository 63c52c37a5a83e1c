//! Domain model for remote object discovery.
//!
//! The discovery domain models peer, interface and object-path identity,
//! parsed introspection documents, and the objects a discovery run finds.
//! Transport concerns remain outside this boundary.

mod error;
mod introspection;
mod names;
mod object;
mod path;

pub use error::{DiscoveryDomainError, MalformedDocumentError};
pub use introspection::IntrospectionResult;
pub use names::{InterfaceName, PeerName};
pub use object::{DiscoveredObject, DiscoveryResult, DiscoveryRunId};
pub use path::ObjectPath;
