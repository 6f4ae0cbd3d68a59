//! Event delivery, failure isolation and reentrant sinks.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use tidemark_core::{
    Axis, CrossingEvent, EventTarget, NotificationSink, RecordingSink, ReportSummary, SinkError,
    Watcher, WatcherConfig,
};

use crate::common::Host;

#[test]
fn bubbles_flag_is_copied_onto_events() {
    let host = Host::new(300, 300);
    let watcher = Watcher::new(&host.viewport, WatcherConfig::default().with_bubbles(false));
    watcher.register_boundary("wide", 400, Axis::Width, Vec::new());

    host.resize(450, 300);
    let events = host.sink.take();
    assert_eq!(events.len(), 1);
    assert!(!events[0].bubbles);
    assert_eq!(events[0].name.as_str(), "cross");
}

#[test]
fn dedicated_sink_bypasses_the_global_one() {
    let host = Host::new(300, 300);
    let own = Rc::new(RecordingSink::new());
    let target: Rc<dyn NotificationSink> = own.clone();
    let watcher = Watcher::new(&host.viewport, WatcherConfig::default().with_sink(target));
    watcher.register_boundary("wide", 400, Axis::Width, Vec::new());

    host.resize(450, 300);

    assert_eq!(own.len(), 1);
    assert!(host.sink.is_empty());
}

#[test]
fn rejected_event_does_not_stop_the_pass() {
    let host = Host::new(100, 100);
    let accepted = Rc::new(RefCell::new(Vec::new()));
    let log = accepted.clone();
    let target: Rc<dyn NotificationSink> = Rc::new(move |event: &CrossingEvent| {
        if event.key().as_str() == "bad" {
            return Err(SinkError::Rejected("no listener for bad".into()));
        }
        log.borrow_mut().push(event.key().to_string());
        Ok(())
    });
    let watcher = Watcher::new(&host.viewport, WatcherConfig::default().with_sink(target));
    for key in ["bad", "good-1", "good-2"] {
        watcher.register_boundary(key, 200, Axis::Width, Vec::new());
    }

    host.resize(300, 100);

    assert_eq!(
        watcher.last_report(),
        Some(ReportSummary {
            crossed: 3,
            delivered: 2,
            failed: 1,
        })
    );
    let mut delivered = accepted.borrow().clone();
    delivered.sort();
    assert_eq!(delivered, ["good-1", "good-2"]);
    // The failed key still flipped sides.
    assert!(watcher.boundary("bad").unwrap().past_boundary());
}

#[test]
fn detached_watcher_fails_without_affecting_neighbours() {
    let host = Host::new(300, 300);
    let detached = Watcher::new(
        &host.viewport,
        WatcherConfig::default().with_target(EventTarget::Detached),
    );
    let attached = host.watcher();
    detached.register_boundary("wide", 400, Axis::Width, Vec::new());
    attached.register_boundary("wide", 400, Axis::Width, Vec::new());

    host.resize(450, 300);

    assert_eq!(detached.last_report().unwrap().failed, 1);
    assert!(detached.boundary("wide").unwrap().past_boundary());
    assert_eq!(attached.last_report().unwrap().delivered, 1);
    assert_eq!(host.sink.len(), 1);
}

#[test]
fn global_target_without_global_sink_fails_each_crossing() {
    let host = Host::without_sink(300, 300);
    let watcher = host.watcher();
    watcher.register_boundary("a", 400, Axis::Width, Vec::new());
    watcher.register_boundary("b", 350, Axis::Width, Vec::new());

    host.resize(450, 300);

    let report = watcher.last_report().unwrap();
    assert_eq!((report.crossed, report.failed), (2, 2));
    assert!(host.sink.is_empty());
}

#[test]
fn sink_may_mutate_the_registry_while_handling_an_event() {
    let host = Host::new(300, 300);
    let slot: Rc<OnceCell<Watcher>> = Rc::new(OnceCell::new());
    let hook = Rc::downgrade(&slot);
    let seen = Rc::new(RecordingSink::new());
    let recorder = seen.clone();

    let target: Rc<dyn NotificationSink> = Rc::new(move |event: &CrossingEvent| {
        if let Some(slot) = hook.upgrade()
            && let Some(watcher) = slot.get()
        {
            watcher.remove_boundary(event.key().as_str());
            watcher.register_boundary("late", 100, Axis::Width, Vec::new());
        }
        recorder.dispatch(event)
    });
    let watcher = Watcher::new(&host.viewport, WatcherConfig::default().with_sink(target));
    watcher.register_boundary("wide", 400, Axis::Width, Vec::new());
    assert!(slot.set(watcher).is_ok());

    host.resize(450, 300);

    let watcher = slot.get().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(watcher.boundary("wide").is_none());
    // Seeded from the dimensions committed by this pass.
    assert!(watcher.boundary("late").unwrap().past_boundary());
}
