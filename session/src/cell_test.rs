use std::sync::Mutex;

use super::*;

#[test]
fn update_publishes_to_subscribers() {
    let cell = SessionCell::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    cell.subscribe(move |s| sink.lock().unwrap().push(s.is_loading));

    cell.update(|s| s.is_loading = true);
    cell.update(|s| s.is_loading = false);

    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
}

#[test]
fn is_initialized_cannot_be_lowered() {
    let cell = SessionCell::new();
    cell.update(|s| s.is_initialized = true);
    let after = cell.update(|s| s.is_initialized = false);
    assert!(after.is_initialized);
    assert!(cell.snapshot().is_initialized);
}

#[test]
fn unsubscribe_stops_delivery() {
    let cell = SessionCell::new();
    let count = Arc::new(Mutex::new(0_u32));
    let sink = Arc::clone(&count);
    let id = cell.subscribe(move |_| *sink.lock().unwrap() += 1);

    cell.update(|s| s.is_loading = true);
    assert!(cell.unsubscribe(id));
    assert!(!cell.unsubscribe(id));
    cell.update(|s| s.is_loading = false);

    assert_eq!(*count.lock().unwrap(), 1);
}

#[test]
fn subscriber_may_read_cell_reentrantly() {
    let cell = SessionCell::new();
    let reader = cell.clone();
    let observed = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&observed);
    cell.subscribe(move |_| *sink.lock().unwrap() = Some(reader.read(|s| s.is_loading)));

    cell.update(|s| s.is_loading = true);

    assert_eq!(*observed.lock().unwrap(), Some(true));
}

#[test]
fn clones_share_state() {
    let cell = SessionCell::new();
    let other = cell.clone();
    cell.update(|s| s.error = Some("boom".to_owned()));
    assert_eq!(other.snapshot().error.as_deref(), Some("boom"));
}
