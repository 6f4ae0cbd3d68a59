//! Shared viewport hub.
//!
//! One [`Viewport`] stands for one host viewport. It owns the dimension state
//! every watcher reads, the single raw resize subscription, the host
//! scheduler and the optional global sink.
//!
//! The raw subscription is reference counted over listening watchers: the
//! source is subscribed when the first watcher starts listening and
//! unsubscribed when the last one stops, so there is never more than one.
//! Listeners are held weakly; a watcher unregisters itself on drop.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tidemark_types::Dimensions;

use crate::dimension_state::DimensionState;
use crate::host::{NotificationSink, ResizeSource, Scheduler};
use crate::watcher::WatcherShared;

struct Listener {
    id: u64,
    watcher: Weak<WatcherShared>,
}

struct ViewportInner {
    source: Rc<dyn ResizeSource>,
    scheduler: Rc<dyn Scheduler>,
    global_sink: Option<Rc<dyn NotificationSink>>,
    dimensions: DimensionState,
    listeners: RefCell<Vec<Listener>>,
    next_watcher_id: Cell<u64>,
}

/// Cheap handle; clones share the same hub.
#[derive(Clone)]
pub struct Viewport {
    inner: Rc<ViewportInner>,
}

impl Viewport {
    /// Build a hub without a global sink. Watchers targeting
    /// [`EventTarget::Global`](crate::EventTarget::Global) will fail to dispatch.
    ///
    /// Dimensions are read from `source` once, here.
    #[must_use]
    pub fn new(source: Rc<dyn ResizeSource>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::build(source, scheduler, None)
    }

    #[must_use]
    pub fn with_global_sink(
        source: Rc<dyn ResizeSource>,
        scheduler: Rc<dyn Scheduler>,
        sink: Rc<dyn NotificationSink>,
    ) -> Self {
        Self::build(source, scheduler, Some(sink))
    }

    fn build(
        source: Rc<dyn ResizeSource>,
        scheduler: Rc<dyn Scheduler>,
        global_sink: Option<Rc<dyn NotificationSink>>,
    ) -> Self {
        let initial = source.dimensions();
        tracing::debug!(
            width = initial.width,
            height = initial.height,
            "Viewport initialized"
        );
        Self {
            inner: Rc::new(ViewportInner {
                source,
                scheduler,
                global_sink,
                dimensions: DimensionState::new(initial),
                listeners: RefCell::new(Vec::new()),
                next_watcher_id: Cell::new(0),
            }),
        }
    }

    /// Last confirmed dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.inner.dimensions.get()
    }

    #[must_use]
    pub fn dimension_state(&self) -> DimensionState {
        self.inner.dimensions.clone()
    }

    /// Whether the raw source is currently subscribed.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        !self.inner.listeners.borrow().is_empty()
    }

    /// Number of watchers currently listening.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Forward one raw resize signal to every listening watcher.
    ///
    /// Hosts call this from their resize handler. Signals arriving while no
    /// watcher listens are ignored.
    pub fn notify_resize(&self) {
        let targets: Vec<Rc<WatcherShared>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .filter_map(|listener| listener.watcher.upgrade())
            .collect();

        for watcher in targets {
            watcher.on_raw_resize();
        }
    }

    pub(crate) fn next_watcher_id(&self) -> u64 {
        let id = self.inner.next_watcher_id.get().wrapping_add(1);
        self.inner.next_watcher_id.set(id);
        id
    }

    pub(crate) fn scheduler(&self) -> &dyn Scheduler {
        self.inner.scheduler.as_ref()
    }

    pub(crate) fn global_sink(&self) -> Option<Rc<dyn NotificationSink>> {
        self.inner.global_sink.clone()
    }

    /// Read the source and commit the result as the shared dimensions.
    pub(crate) fn read_source(&self) -> Dimensions {
        let dims = self.inner.source.dimensions();
        self.inner.dimensions.set(dims);
        dims
    }

    pub(crate) fn attach(&self, id: u64, watcher: Weak<WatcherShared>) {
        let first = {
            let mut listeners = self.inner.listeners.borrow_mut();
            listeners.push(Listener { id, watcher });
            listeners.len() == 1
        };
        if first {
            self.inner.source.subscribe();
            tracing::info!("Raw resize subscription started");
        }
    }

    pub(crate) fn detach(&self, id: u64) {
        let last = {
            let mut listeners = self.inner.listeners.borrow_mut();
            let before = listeners.len();
            listeners.retain(|listener| listener.id != id);
            before > 0 && listeners.is_empty()
        };
        if last {
            self.inner.source.unsubscribe();
            tracing::info!("Raw resize subscription stopped");
        }
    }
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("dimensions", &self.dimensions())
            .field("listeners", &self.listener_count())
            .field("global_sink", &self.inner.global_sink.is_some())
            .finish_non_exhaustive()
    }
}
