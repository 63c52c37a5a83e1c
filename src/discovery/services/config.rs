//! Discovery configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Peer-name marker used when no configuration is supplied.
pub const DEFAULT_DOMAIN_PREFIX: &str = "endlessm";

/// Deepest level below a walk's root that is still introspected by default.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tunables for a discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Substring a peer name must contain to be searched. `None` searches
    /// every peer.
    pub domain_prefix: Option<String>,
    /// Deadline for each introspect call and for peer enumeration. `None`
    /// waits indefinitely.
    #[serde(rename = "call_timeout_ms", with = "optional_millis")]
    pub call_timeout: Option<Duration>,
    /// Deepest level below the root whose children are still explored.
    /// `None` removes the limit.
    pub max_depth: Option<usize>,
    /// Whether the bus daemon itself is walked when it passes the filter.
    pub include_bus_daemon: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            domain_prefix: Some(DEFAULT_DOMAIN_PREFIX.to_owned()),
            call_timeout: None,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            include_bus_daemon: false,
        }
    }
}

impl DiscoveryConfig {
    /// Creates a configuration that searches every peer on the bus.
    #[must_use]
    pub fn unfiltered() -> Self {
        Self {
            domain_prefix: None,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryConfigError`] when the document is not valid JSON or
    /// contains unknown fields.
    pub fn from_json(json: &str) -> Result<Self, DiscoveryConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the peer-name marker.
    #[must_use]
    pub fn with_domain_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.domain_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-call deadline.
    #[must_use]
    pub const fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Sets the depth limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Allows the bus daemon to be walked.
    #[must_use]
    pub const fn with_bus_daemon(mut self) -> Self {
        self.include_bus_daemon = true;
        self
    }
}

/// Error returned when a configuration document cannot be loaded.
#[derive(Debug, Error)]
#[error("invalid discovery configuration: {0}")]
pub struct DiscoveryConfigError(#[from] serde_json::Error);

mod optional_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[expect(clippy::ref_option, reason = "serde `with` signature")]
    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => {
                serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
