use std::borrow::Borrow;
use std::fmt;

/// Caller-chosen identifier of a registered boundary.
///
/// Passed back verbatim as `key` on every crossing event for that boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct BoundaryKey(String);

impl BoundaryKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoundaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BoundaryKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BoundaryKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for BoundaryKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
