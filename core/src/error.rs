//! Dispatch failures.
//!
//! A crossing whose event cannot be delivered produces a [`ConfigurationError`].
//! The reporter logs it with the watcher configuration and moves on to the
//! next boundary; nothing is returned to callers of the watcher API.

use serde::Serialize;
use thiserror::Error;

use crate::host::SinkError;
use crate::watcher::WatcherConfig;

const MISSING_TARGET: &str = "Invalid event target. Check the parent property in the watcher config.";

/// Loggable view of a watcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSnapshot {
    pub target: &'static str,
    pub event_name: String,
    pub event_name_return: String,
    pub init_on_call: bool,
    pub bubbles: bool,
    pub throttle_ms: u64,
}

impl From<&WatcherConfig> for ConfigSnapshot {
    fn from(config: &WatcherConfig) -> Self {
        let options = config.options();
        Self {
            target: config.target().describe(),
            event_name: options.event_name.to_string(),
            event_name_return: options.event_name_return.to_string(),
            init_on_call: options.init_on_call,
            bubbles: options.bubbles,
            throttle_ms: u64::try_from(options.throttle.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ConfigurationError {
    message: String,
    config: ConfigSnapshot,
    source: Option<SinkError>,
}

impl ConfigurationError {
    /// No dispatch target is configured.
    #[must_use]
    pub fn missing_target(config: &WatcherConfig) -> Self {
        Self {
            message: MISSING_TARGET.to_string(),
            config: config.into(),
            source: None,
        }
    }

    /// The configured target refused the event.
    #[must_use]
    pub fn rejected(config: &WatcherConfig, source: SinkError) -> Self {
        Self {
            message: format!("Invalid event target: {source}"),
            config: config.into(),
            source: Some(source),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn config(&self) -> &ConfigSnapshot {
        &self.config
    }
}
