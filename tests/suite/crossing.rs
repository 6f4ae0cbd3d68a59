//! Direction-aware crossing events driven through a fake viewport.

use serde_json::{Value, json};
use tidemark_core::{Axis, EventName, Watcher, WatcherConfig};

use crate::common::Host;

fn named(outward: &str, back: &str) -> WatcherConfig {
    WatcherConfig::default().with_event_names(
        EventName::new(outward).unwrap(),
        EventName::new(back).unwrap(),
    )
}

#[test]
fn registration_seeds_side_from_current_width() {
    let host = Host::new(500, 300);
    let watcher = host.watcher();

    watcher.register_boundary("wide", 400, Axis::Width, Vec::new());
    watcher.register_boundary("huge", 900, Axis::Width, Vec::new());

    assert!(watcher.boundary("wide").unwrap().past_boundary());
    assert!(!watcher.boundary("huge").unwrap().past_boundary());
}

#[test]
fn growing_then_shrinking_emits_outward_then_return() {
    let host = Host::new(300, 300);
    let watcher = Watcher::new(&host.viewport, named("enter", "leave"));
    watcher.register_boundary("wide", 400, Axis::Width, Vec::new());

    host.resize(450, 300);
    let events = host.sink.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name.as_str(), "enter");
    assert!(events[0].payload.past_boundary);
    assert_eq!(events[0].payload.modified, Axis::Width);
    assert_eq!((events[0].payload.width, events[0].payload.height), (450, 300));

    host.resize(300, 300);
    let events = host.sink.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name.as_str(), "leave");
    assert!(!events[0].payload.past_boundary);
    assert!(!watcher.boundary("wide").unwrap().past_boundary());
}

#[test]
fn staying_on_one_side_emits_nothing() {
    let host = Host::new(300, 300);
    let watcher = host.watcher();
    watcher.register_boundary("wide", 400, Axis::Width, Vec::new());

    host.resize(350, 300);
    host.resize(399, 300);
    host.resize(10, 10);

    assert!(host.sink.is_empty());
    assert_eq!(watcher.passes(), 3);
}

#[test]
fn height_boundary_ignores_width_changes() {
    let host = Host::new(300, 300);
    let watcher = host.watcher();
    watcher.register_boundary("tall", 400, Axis::Height, Vec::new());

    host.resize(1000, 300);
    assert!(host.sink.is_empty());

    host.resize(1000, 500);
    let events = host.sink.take();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].payload.modified, Axis::Height);
    assert!(events[0].payload.past_boundary);
}

#[test]
fn data_is_passed_back_verbatim() {
    let host = Host::new(300, 300);
    let watcher = host.watcher();
    let data = vec![json!("a"), json!("b"), json!({"n": 1})];
    watcher.register_boundary("wide", 400, Axis::Width, data.clone());

    host.resize(450, 300);
    host.resize(300, 300);

    let events = host.sink.take();
    assert_eq!(events.len(), 2);
    for event in &events {
        assert_eq!(event.payload.data, data);
    }
}

#[test]
fn width_equal_to_threshold_behaves_asymmetrically() {
    // Seeded exactly at the threshold: recorded as not past.
    let host = Host::new(400, 300);
    let watcher = host.watcher();
    watcher.register_boundary("edge", 400, Axis::Width, Vec::new());
    assert!(!watcher.boundary("edge").unwrap().past_boundary());

    // Evaluated exactly at the threshold from the not-past side: crosses.
    host.resize(400, 300);
    let events = host.sink.take();
    assert_eq!(events.len(), 1);
    assert!(events[0].payload.past_boundary);

    // From the past side, sitting on the threshold counts as still past.
    host.resize(400, 300);
    assert!(host.sink.is_empty());
}

#[test]
fn re_registering_replaces_entry_and_reseeds() {
    let host = Host::new(500, 300);
    let watcher = host.watcher();
    watcher.register_boundary("k", 400, Axis::Width, vec![Value::from(1)]);
    watcher.register_boundary("k", 600, Axis::Width, vec![Value::from(2)]);

    assert_eq!(watcher.len(), 1);
    let entry = watcher.boundary("k").unwrap();
    assert_eq!(entry.boundary(), 600);
    assert!(!entry.past_boundary());
    assert_eq!(entry.data(), &[Value::from(2)]);
}

#[test]
fn removed_boundary_no_longer_reports() {
    let host = Host::new(300, 300);
    let watcher = host.watcher();
    watcher.register_boundary("wide", 400, Axis::Width, Vec::new());

    assert!(watcher.remove_boundary("wide"));
    assert!(watcher.remove_boundary("never-registered"));
    assert!(watcher.is_empty());

    host.resize(450, 300);
    assert!(host.sink.is_empty());
}

#[test]
fn each_crossed_boundary_reports_once_per_pass() {
    let host = Host::new(100, 100);
    let watcher = host.watcher();
    watcher.register_boundary("a", 200, Axis::Width, Vec::new());
    watcher.register_boundary("b", 300, Axis::Width, Vec::new());
    watcher.register_boundary("c", 900, Axis::Width, Vec::new());

    host.resize(500, 100);

    let mut keys: Vec<_> = host
        .sink
        .take()
        .iter()
        .map(|event| event.key().to_string())
        .collect();
    keys.sort();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(watcher.last_report().unwrap().crossed, 2);
}

#[test]
fn payload_serializes_with_camel_case_fields() {
    let host = Host::new(300, 300);
    let watcher = host.watcher();
    watcher.register_boundary("wide", 400, Axis::Width, vec![json!("a"), json!("b")]);

    host.resize(450, 300);
    let events = host.sink.take();
    let json = serde_json::to_string(&events[0].payload).unwrap();
    insta::assert_snapshot!(json, @r#"{"key":"wide","width":450,"height":300,"pastBoundary":true,"modified":"width","data":["a","b"]}"#);
}
