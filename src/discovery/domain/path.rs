//! Bus object paths.

use super::DiscoveryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const ROOT: &str = "/";

/// Hierarchical address of an object within a peer's namespace.
///
/// A valid object path is either `/` or a sequence of `/`-prefixed segments,
/// each non-empty and made of ASCII letters, digits, and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Returns the root object path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self(ROOT.to_owned())
    }

    /// Creates a validated object path.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError::InvalidObjectPath`] when the value is
    /// not a valid bus object path.
    pub fn new(value: impl Into<String>) -> Result<Self, DiscoveryDomainError> {
        let path = value.into();
        if path == ROOT {
            return Ok(Self(path));
        }

        let Some(rest) = path.strip_prefix('/') else {
            return Err(DiscoveryDomainError::InvalidObjectPath(path));
        };
        if !rest.split('/').all(is_valid_segment) {
            return Err(DiscoveryDomainError::InvalidObjectPath(path));
        }

        Ok(Self(path))
    }

    /// Joins a single child segment onto this path.
    ///
    /// The root path concatenates the segment directly; every other path
    /// inserts a `/` separator, so the result never contains `//`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError::InvalidPathSegment`] when `segment` is
    /// empty or contains characters outside `[A-Za-z0-9_]`.
    pub fn child(&self, segment: &str) -> Result<Self, DiscoveryDomainError> {
        if !is_valid_segment(segment) {
            return Err(DiscoveryDomainError::InvalidPathSegment {
                parent: self.0.clone(),
                segment: segment.to_owned(),
            });
        }

        if self.is_root() {
            Ok(Self(format!("{ROOT}{segment}")))
        } else {
            Ok(Self(format!("{}/{segment}", self.0)))
        }
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == ROOT
    }

    /// Number of segments below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.matches('/').count()
        }
    }

    /// Returns `true` when this path equals `ancestor` or is nested beneath it.
    #[must_use]
    pub fn is_within(&self, ancestor: &Self) -> bool {
        if ancestor.is_root() || self == ancestor {
            return true;
        }
        self.0
            .strip_prefix(ancestor.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || character == '_')
}

impl Default for ObjectPath {
    fn default() -> Self {
        Self::root()
    }
}

impl TryFrom<String> for ObjectPath {
    type Error = DiscoveryDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectPath> for String {
    fn from(value: ObjectPath) -> Self {
        value.0
    }
}

impl AsRef<str> for ObjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
