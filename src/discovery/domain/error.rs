//! Error types for discovery domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing discovery domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscoveryDomainError {
    /// The peer name is empty.
    #[error("peer name must not be empty")]
    EmptyPeerName,

    /// The interface name is empty.
    #[error("interface name must not be empty")]
    EmptyInterfaceName,

    /// The object path is not a syntactically valid bus object path.
    #[error("invalid object path '{0}'")]
    InvalidObjectPath(String),

    /// A child node name cannot be joined onto its parent path.
    #[error("invalid child segment '{segment}' under object path '{parent}'")]
    InvalidPathSegment {
        /// Parent object path.
        parent: String,
        /// Rejected child segment.
        segment: String,
    },
}

/// Error returned when an introspection document cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed introspection document: {0}")]
pub struct MalformedDocumentError(pub String);
