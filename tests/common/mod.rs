//! Shared test utilities and fixtures
//!
//! A fake viewport with a manually advanced clock, wired to a recording sink.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tidemark_core::host::ResizeSource;
use tidemark_core::{Dimensions, RecordingSink, TimerQueue, Viewport, Watcher, WatcherConfig};

pub const THROTTLE: Duration = Duration::from_millis(66);

/// Scriptable viewport size with a subscription counter.
#[derive(Debug, Default)]
pub struct FakeViewport {
    dims: Cell<Dimensions>,
    active: Cell<i32>,
    subscribe_calls: Cell<u32>,
    reads: Cell<u32>,
}

impl FakeViewport {
    pub fn set(&self, width: u32, height: u32) {
        self.dims.set(Dimensions::new(width, height));
    }

    /// Subscriptions currently held by the engine.
    pub fn active_subscriptions(&self) -> i32 {
        self.active.get()
    }

    pub fn subscribe_calls(&self) -> u32 {
        self.subscribe_calls.get()
    }

    /// Number of times the engine read the size.
    pub fn reads(&self) -> u32 {
        self.reads.get()
    }
}

impl ResizeSource for FakeViewport {
    fn dimensions(&self) -> Dimensions {
        self.reads.set(self.reads.get() + 1);
        self.dims.get()
    }

    fn subscribe(&self) {
        self.active.set(self.active.get() + 1);
        self.subscribe_calls.set(self.subscribe_calls.get() + 1);
    }

    fn unsubscribe(&self) {
        self.active.set(self.active.get() - 1);
    }
}

pub struct Host {
    pub source: Rc<FakeViewport>,
    pub timers: Rc<TimerQueue>,
    pub sink: Rc<RecordingSink>,
    pub viewport: Viewport,
}

impl Host {
    /// Viewport whose global sink records every event.
    pub fn new(width: u32, height: u32) -> Self {
        let source = Rc::new(FakeViewport::default());
        source.set(width, height);
        let timers = Rc::new(TimerQueue::new());
        let sink = Rc::new(RecordingSink::new());
        let viewport = Viewport::with_global_sink(source.clone(), timers.clone(), sink.clone());
        Self {
            source,
            timers,
            sink,
            viewport,
        }
    }

    /// Viewport with no global sink.
    pub fn without_sink(width: u32, height: u32) -> Self {
        let host = Self::new(width, height);
        let viewport = Viewport::new(host.source.clone(), host.timers.clone());
        Self { viewport, ..host }
    }

    pub fn watcher(&self) -> Watcher {
        Watcher::new(&self.viewport, WatcherConfig::default())
    }

    /// One raw signal without advancing time.
    pub fn signal(&self, width: u32, height: u32) {
        self.source.set(width, height);
        self.viewport.notify_resize();
    }

    /// One raw signal followed by a full throttle interval.
    pub fn resize(&self, width: u32, height: u32) {
        self.signal(width, height);
        self.timers.advance(THROTTLE);
    }
}
