//! Configuration loading for Tidemark.
//!
//! The file is TOML. Raw deserialization structs (all `Option`) stay private
//! here and are resolved into validated [`tidemark_types`] values at the parse
//! boundary, so downstream crates never see a half-valid configuration.
//!
//! ```toml
//! [watcher]
//! event_name = "enter"
//! event_name_return = "leave"
//! throttle_ms = 66
//!
//! [[boundary]]
//! id = "wide"
//! threshold = 120
//! axis = "width"
//! data = ["layout", 2]
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use tidemark_types::{Axis, BoundaryKey, BoundarySpec, EventName, WatcherOptions};

/// Environment variable that overrides the default config location.
pub const CONFIG_ENV_VAR: &str = "TIDEMARK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    watcher: Option<RawWatcher>,
    #[serde(default, rename = "boundary")]
    boundaries: Vec<RawBoundary>,
}

#[derive(Debug, Default, Deserialize)]
struct RawWatcher {
    event_name: Option<String>,
    event_name_return: Option<String>,
    init_on_call: Option<bool>,
    bubbles: Option<bool>,
    throttle_ms: Option<u64>,
    target: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBoundary {
    id: String,
    threshold: u32,
    #[serde(default)]
    axis: Option<String>,
    #[serde(default)]
    data: Vec<toml::Value>,
}

/// Where watcher events go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetMode {
    /// The host's global sink.
    #[default]
    Global,
    /// No target; crossings are logged as dispatch failures.
    Detached,
}

impl TargetMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "global" | "window" => Some(TargetMode::Global),
            "none" | "detached" => Some(TargetMode::Detached),
            _ => None,
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TidemarkConfig {
    pub watcher: WatcherOptions,
    pub target: TargetMode,
    pub boundaries: Vec<BoundarySpec>,
}

impl TidemarkConfig {
    /// Parse and validate TOML content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        resolve(raw)
    }

    /// Load from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!("Failed to read config at {:?}: {}", path, source);
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::parse(&content).inspect_err(|err| {
            tracing::warn!("Failed to load config at {:?}: {}", path, err);
        })
    }

    /// Load from the resolved location. `Ok(None)` when no file exists there.
    pub fn load(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path(explicit) else {
            return Ok(None);
        };
        if !path.exists() {
            // An explicitly named file must exist.
            if explicit.is_some() {
                return Err(ConfigError::Read {
                    path,
                    source: io::Error::from(io::ErrorKind::NotFound),
                });
            }
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }
}

/// Config location: `explicit`, then `$TIDEMARK_CONFIG`, then `~/.tidemark/config.toml`.
#[must_use]
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    default_config_path()
}

#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tidemark").join("config.toml"))
}

/// Replace `${VAR}` references with environment values. Unset variables
/// expand to the empty string; an unterminated `${` is kept literally.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn resolve(raw: RawConfig) -> Result<TidemarkConfig, ConfigError> {
    let watcher = raw.watcher.unwrap_or_default();
    let defaults = WatcherOptions::default();

    let target = match watcher.target.as_deref() {
        None => TargetMode::default(),
        Some(value) => TargetMode::parse(value)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown watcher target: {value}")))?,
    };

    let options = WatcherOptions {
        event_name: event_name(watcher.event_name, "event_name")?
            .unwrap_or(defaults.event_name),
        event_name_return: event_name(watcher.event_name_return, "event_name_return")?
            .unwrap_or(defaults.event_name_return),
        init_on_call: watcher.init_on_call.unwrap_or(defaults.init_on_call),
        bubbles: watcher.bubbles.unwrap_or(defaults.bubbles),
        throttle: watcher
            .throttle_ms
            .map_or(defaults.throttle, Duration::from_millis),
    };

    let boundaries = raw
        .boundaries
        .into_iter()
        .map(resolve_boundary)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TidemarkConfig {
        watcher: options,
        target,
        boundaries,
    })
}

fn event_name(raw: Option<String>, field: &str) -> Result<Option<EventName>, ConfigError> {
    raw.map(|value| {
        EventName::new(expand_env_vars(&value))
            .map_err(|err| ConfigError::Invalid(format!("watcher.{field}: {err}")))
    })
    .transpose()
}

fn resolve_boundary(raw: RawBoundary) -> Result<BoundarySpec, ConfigError> {
    let id = expand_env_vars(&raw.id);
    if id.trim().is_empty() {
        return Err(ConfigError::Invalid("boundary id must not be empty".to_string()));
    }

    let axis = match raw.axis.as_deref() {
        None => Axis::Width,
        Some(value) => Axis::parse(value).ok_or_else(|| {
            ConfigError::Invalid(format!("boundary {id}: unknown axis {value:?}"))
        })?,
    };

    let data = raw
        .data
        .into_iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| ConfigError::Invalid(format!("boundary {id}: {err}")))?;

    Ok(BoundarySpec {
        key: BoundaryKey::new(id),
        threshold: raw.threshold,
        axis,
        data,
    })
}
