//! Resolved watcher configuration shared across crates.
//!
//! These types represent fully-validated configuration state. Raw TOML
//! deserialization structs (with `Option` fields) stay private in
//! `tidemark-config`, which resolves them into these types at the parse boundary.

use std::time::Duration;

use serde_json::Value;

use crate::{Axis, BoundaryKey, EventName};

/// Minimum interval between two dimension updates unless configured otherwise.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(66);

/// Watcher behavior fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherOptions {
    /// Fired when a dimension moves beyond a boundary.
    pub event_name: EventName,
    /// Fired when a dimension comes back under a boundary.
    pub event_name_return: EventName,
    /// Start listening as soon as the watcher is built.
    pub init_on_call: bool,
    pub bubbles: bool,
    pub throttle: Duration,
}

impl Default for WatcherOptions {
    fn default() -> Self {
        Self {
            event_name: EventName::default(),
            event_name_return: EventName::default(),
            init_on_call: true,
            bubbles: true,
            throttle: DEFAULT_THROTTLE,
        }
    }
}

/// A boundary to register, as declared in configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySpec {
    pub key: BoundaryKey,
    pub threshold: u32,
    pub axis: Axis,
    pub data: Vec<Value>,
}
