//! Post-resize scan over a registry.
//!
//! Collection and delivery are split so the registry borrow is released before
//! any sink runs. Sinks may then call back into the watcher that produced the
//! event.

use std::rc::Rc;

use tidemark_types::{CrossingEvent, CrossingPayload, Dimensions};

use crate::error::ConfigurationError;
use crate::evaluator::has_crossed;
use crate::host::NotificationSink;
use crate::registry::BoundaryRegistry;
use crate::watcher::WatcherConfig;

/// Outcome of one reporter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Boundaries whose side flipped during the pass.
    pub crossed: usize,
    pub delivered: usize,
    pub failed: usize,
}

pub struct Reporter<'a> {
    config: &'a WatcherConfig,
    sink: Option<Rc<dyn NotificationSink>>,
}

impl<'a> Reporter<'a> {
    /// `sink` is the resolved dispatch target; `None` means no target is configured.
    #[must_use]
    pub fn new(config: &'a WatcherConfig, sink: Option<Rc<dyn NotificationSink>>) -> Self {
        Self { config, sink }
    }

    /// Flip every stale entry and build its event.
    ///
    /// State changes are committed here, before delivery, and are not rolled
    /// back if delivery later fails.
    pub fn collect(&self, registry: &mut BoundaryRegistry, dims: Dimensions) -> Vec<CrossingEvent> {
        let options = self.config.options();
        let mut events = Vec::new();

        for (key, entry) in registry.iter_mut() {
            if !has_crossed(entry, dims) {
                continue;
            }

            let past_boundary = entry.flip();
            let name = if past_boundary {
                options.event_name.clone()
            } else {
                options.event_name_return.clone()
            };
            tracing::trace!(key = %key, event = %name, past_boundary, "Boundary crossed");

            events.push(CrossingEvent {
                name,
                payload: CrossingPayload {
                    key: key.clone(),
                    width: dims.width,
                    height: dims.height,
                    past_boundary,
                    modified: entry.axis(),
                    data: entry.data().to_vec(),
                },
                bubbles: options.bubbles,
            });
        }

        events
    }

    /// Hand each event to the sink. A failure is logged and does not stop the
    /// remaining events.
    pub fn deliver(&self, events: &[CrossingEvent]) -> ReportSummary {
        let mut summary = ReportSummary {
            crossed: events.len(),
            ..ReportSummary::default()
        };

        for event in events {
            match self.dispatch(event) {
                Ok(()) => summary.delivered += 1,
                Err(err) => {
                    summary.failed += 1;
                    tracing::error!(
                        key = %event.key(),
                        event = %event.name,
                        config = ?err.config(),
                        "Failed to dispatch crossing event: {err}"
                    );
                }
            }
        }

        summary
    }

    fn dispatch(&self, event: &CrossingEvent) -> Result<(), ConfigurationError> {
        let Some(sink) = self.sink.as_ref() else {
            return Err(ConfigurationError::missing_target(self.config));
        };
        sink.dispatch(event)
            .map_err(|source| ConfigurationError::rejected(self.config, source))
    }
}
