//! Boundary-crossing engine for Tidemark.
//!
//! Watches one viewport axis per boundary and emits a direction-aware event
//! whenever the dimension crosses a registered threshold.
//!
//! ```text
//! host resize --> Viewport::notify_resize --> ThrottleGate (per watcher)
//!                                                 |
//!                                      timer fires after interval
//!                                                 v
//!                          DimensionState <- ResizeSource::dimensions()
//!                                                 |
//!                                   Reporter: evaluate, flip, dispatch
//!                                                 v
//!                                        NotificationSink
//! ```
//!
//! Everything runs on one thread. Host collaborators are the traits in
//! [`host`]; [`TimerQueue`] and [`RecordingSink`] are in-crate implementations
//! for custom event loops and tests.

mod dimension_state;
mod error;
mod evaluator;
pub mod host;
mod registry;
mod reporter;
mod sinks;
mod throttle;
mod timer_queue;
mod viewport;
mod watcher;

pub use dimension_state::DimensionState;
pub use error::{ConfigSnapshot, ConfigurationError};
pub use evaluator::has_crossed;
pub use host::{NotificationSink, ResizeSource, Scheduler, SinkError};
pub use registry::{BoundaryEntry, BoundaryRegistry};
pub use reporter::{ReportSummary, Reporter};
pub use sinks::RecordingSink;
pub use throttle::ThrottleGate;
pub use timer_queue::TimerQueue;
pub use viewport::Viewport;
pub use watcher::{EventTarget, Watcher, WatcherConfig};

pub use tidemark_types::{
    Axis, BoundaryKey, BoundarySpec, CrossingEvent, CrossingPayload, Dimensions, EventName,
    WatcherOptions,
};
