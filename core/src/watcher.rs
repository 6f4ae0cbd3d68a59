//! Watcher façade.
//!
//! A [`Watcher`] owns one throttle gate and one boundary registry and is bound
//! to a [`Viewport`]. Every operation is synchronous and infallible; the only
//! failure mode in the engine, a dispatch to a missing or refusing target, is
//! contained inside the reporter pass.
//!
//! # Lifecycle
//!
//! ```text
//! NOT_LISTENING --listen_start--> LISTENING
//! LISTENING     --listen_end----> NOT_LISTENING
//! ```
//!
//! Both transitions are idempotent. `init_on_call` performs the first
//! transition at construction. Stopping does not cancel a throttle timer that
//! is already pending: it still fires once, updates the shared dimensions and
//! runs a reporter pass.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde_json::Value;

use tidemark_types::{Axis, BoundaryKey, BoundarySpec, Dimensions, EventName, WatcherOptions};

use crate::host::NotificationSink;
use crate::registry::{BoundaryEntry, BoundaryRegistry};
use crate::reporter::{ReportSummary, Reporter};
use crate::throttle::ThrottleGate;
use crate::viewport::Viewport;

/// Where a watcher delivers its events.
#[derive(Clone, Default)]
pub enum EventTarget {
    /// The viewport's global sink, if it has one.
    #[default]
    Global,
    Sink(Rc<dyn NotificationSink>),
    /// No target. Every crossing fails to dispatch.
    Detached,
}

impl EventTarget {
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            EventTarget::Global => "global",
            EventTarget::Sink(_) => "sink",
            EventTarget::Detached => "detached",
        }
    }
}

impl fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Watcher configuration, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct WatcherConfig {
    options: WatcherOptions,
    target: EventTarget,
}

impl WatcherConfig {
    #[must_use]
    pub fn new(options: WatcherOptions) -> Self {
        Self {
            options,
            target: EventTarget::Global,
        }
    }

    #[must_use]
    pub fn options(&self) -> &WatcherOptions {
        &self.options
    }

    #[must_use]
    pub fn target(&self) -> &EventTarget {
        &self.target
    }

    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_sink(self, sink: Rc<dyn NotificationSink>) -> Self {
        self.with_target(EventTarget::Sink(sink))
    }

    pub fn with_event_names(mut self, outward: EventName, back: EventName) -> Self {
        self.options.event_name = outward;
        self.options.event_name_return = back;
        self
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.options.throttle = throttle;
        self
    }

    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.options.bubbles = bubbles;
        self
    }

    pub fn with_init_on_call(mut self, init_on_call: bool) -> Self {
        self.options.init_on_call = init_on_call;
        self
    }
}

/// State reachable from pending timers and from the viewport's listener list.
pub(crate) struct WatcherShared {
    id: u64,
    this: Weak<WatcherShared>,
    viewport: Viewport,
    config: WatcherConfig,
    gate: ThrottleGate,
    registry: RefCell<BoundaryRegistry>,
    listening: Cell<bool>,
    passes: Cell<u64>,
    last_report: Cell<Option<ReportSummary>>,
}

impl WatcherShared {
    /// Entry point for one raw resize signal.
    pub(crate) fn on_raw_resize(&self) {
        if !self.gate.offer() {
            tracing::trace!(watcher = self.id, "Resize signal throttled");
            return;
        }

        let this = self.this.clone();
        tracing::debug!(
            watcher = self.id,
            interval_ms = self.gate.interval().as_millis(),
            "Throttle window opened"
        );
        self.viewport.scheduler().schedule(
            self.gate.interval(),
            Box::new(move || {
                if let Some(shared) = this.upgrade() {
                    shared.fire();
                }
            }),
        );
    }

    fn fire(&self) {
        self.gate.release();
        let dims = self.viewport.read_source();
        tracing::debug!(
            watcher = self.id,
            width = dims.width,
            height = dims.height,
            listening = self.listening.get(),
            "Throttle window fired"
        );

        let sink = self.resolve_target();
        let reporter = Reporter::new(&self.config, sink);
        let events = {
            let mut registry = self.registry.borrow_mut();
            reporter.collect(&mut registry, dims)
        };
        let summary = reporter.deliver(&events);

        self.passes.set(self.passes.get() + 1);
        self.last_report.set(Some(summary));
    }

    fn resolve_target(&self) -> Option<Rc<dyn NotificationSink>> {
        match &self.config.target {
            EventTarget::Global => self.viewport.global_sink(),
            EventTarget::Sink(sink) => Some(Rc::clone(sink)),
            EventTarget::Detached => None,
        }
    }
}

/// Boundary watcher bound to one viewport.
pub struct Watcher {
    shared: Rc<WatcherShared>,
}

impl Watcher {
    /// Build a watcher. Starts listening immediately when `init_on_call` is set.
    #[must_use]
    pub fn new(viewport: &Viewport, config: WatcherConfig) -> Self {
        let id = viewport.next_watcher_id();
        let throttle = config.options.throttle;
        let init_on_call = config.options.init_on_call;
        let shared = Rc::new_cyclic(|this| WatcherShared {
            id,
            this: this.clone(),
            viewport: viewport.clone(),
            config,
            gate: ThrottleGate::new(throttle),
            registry: RefCell::new(BoundaryRegistry::new()),
            listening: Cell::new(false),
            passes: Cell::new(0),
            last_report: Cell::new(None),
        });

        let watcher = Self { shared };
        if init_on_call {
            watcher.listen_start();
        }
        watcher
    }

    /// Watch `boundary` on `axis` under `key`, replacing any entry already at
    /// `key`. The recorded side is taken from the current shared dimensions.
    /// `data` is passed back verbatim on every crossing for this key.
    ///
    /// Always returns `true`.
    pub fn register_boundary(
        &self,
        key: impl Into<BoundaryKey>,
        boundary: u32,
        axis: Axis,
        data: Vec<Value>,
    ) -> bool {
        let current = self.shared.viewport.dimensions();
        self.shared
            .registry
            .borrow_mut()
            .register(key.into(), boundary, axis, data, current)
    }

    /// Register a boundary declared in configuration.
    pub fn register(&self, spec: BoundarySpec) -> bool {
        self.register_boundary(spec.key, spec.threshold, spec.axis, spec.data)
    }

    /// Stop watching `key`. Unknown keys are ignored. Always returns `true`.
    pub fn remove_boundary(&self, key: &str) -> bool {
        self.shared.registry.borrow_mut().remove(key)
    }

    /// Begin receiving raw resize signals. No-op when already listening.
    /// Always returns `true`.
    pub fn listen_start(&self) -> bool {
        let shared = &self.shared;
        if !shared.listening.replace(true) {
            shared.viewport.attach(shared.id, Rc::downgrade(shared));
        }
        true
    }

    /// Stop receiving raw resize signals. No-op when already stopped.
    /// A pending throttle timer is not cancelled. Always returns `true`.
    pub fn listen_end(&self) -> bool {
        let shared = &self.shared;
        if shared.listening.replace(false) {
            shared.viewport.detach(shared.id);
        }
        true
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.shared.listening.get()
    }

    /// Current shared dimensions of the viewport.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.shared.viewport.dimensions()
    }

    /// Snapshot of the entry at `key`.
    #[must_use]
    pub fn boundary(&self, key: &str) -> Option<BoundaryEntry> {
        self.shared.registry.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.registry.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.registry.borrow().is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &WatcherConfig {
        &self.shared.config
    }

    /// Whether a throttle timer is pending.
    #[must_use]
    pub fn is_throttled(&self) -> bool {
        self.shared.gate.is_armed()
    }

    /// Number of reporter passes run so far.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.shared.passes.get()
    }

    /// Outcome of the most recent reporter pass.
    #[must_use]
    pub fn last_report(&self) -> Option<ReportSummary> {
        self.shared.last_report.get()
    }
}

impl fmt::Debug for Watcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watcher")
            .field("id", &self.shared.id)
            .field("listening", &self.shared.listening.get())
            .field("boundaries", &self.len())
            .field("config", &self.shared.config)
            .finish()
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.listen_end();
    }
}
