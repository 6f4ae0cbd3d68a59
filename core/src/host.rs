//! Host collaborators.
//!
//! The engine never talks to a windowing system, a clock, or an event bus
//! directly. The host supplies three seams:
//!
//! - [`ResizeSource`]: the raw viewport. Reports current dimensions and is told
//!   when the engine wants raw resize signals. The host forwards each signal
//!   to [`Viewport::notify_resize`](crate::Viewport::notify_resize).
//! - [`Scheduler`]: runs a callback once after a delay. No cancellation.
//! - [`NotificationSink`]: receives crossing events.
//!
//! Everything is single-threaded; callbacks are not required to be `Send`.

use std::io;
use std::time::Duration;

use thiserror::Error;

use tidemark_types::{CrossingEvent, Dimensions};

/// Raw viewport signal producer.
pub trait ResizeSource {
    /// Current viewport size, read at the moment of the call.
    fn dimensions(&self) -> Dimensions;

    /// Begin delivering raw resize signals.
    ///
    /// Called at most once before a matching [`Self::unsubscribe`].
    fn subscribe(&self);

    /// Stop delivering raw resize signals.
    fn unsubscribe(&self);
}

/// One-shot delayed callback facility.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write event: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("{0}")]
    Rejected(String),
}

/// Receives crossing events.
pub trait NotificationSink {
    fn dispatch(&self, event: &CrossingEvent) -> Result<(), SinkError>;
}

impl<F> NotificationSink for F
where
    F: Fn(&CrossingEvent) -> Result<(), SinkError>,
{
    fn dispatch(&self, event: &CrossingEvent) -> Result<(), SinkError> {
        self(event)
    }
}
