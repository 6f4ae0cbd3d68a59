//! Core domain types for Tidemark.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod dimensions;
mod event;
mod ids;
mod options;

pub use dimensions::{Axis, Dimensions};
pub use event::{CrossingEvent, CrossingPayload};
pub use ids::BoundaryKey;
pub use options::{BoundarySpec, DEFAULT_THROTTLE, WatcherOptions};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Event Names
// ============================================================================

/// Name carried by a dispatched crossing event. Guaranteed non-empty (after trimming).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventName(String);

#[derive(Debug, Error)]
#[error("event name must not be empty")]
pub struct EmptyEventNameError;

impl EventName {
    /// Name used for both directions unless configured otherwise.
    pub const DEFAULT: &'static str = "cross";

    pub fn new(value: impl Into<String>) -> Result<Self, EmptyEventNameError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(EmptyEventNameError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for EventName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl TryFrom<String> for EventName {
    type Error = EmptyEventNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EventName {
    type Error = EmptyEventNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventName> for String {
    fn from(value: EventName) -> Self {
        value.0
    }
}

impl std::ops::Deref for EventName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
