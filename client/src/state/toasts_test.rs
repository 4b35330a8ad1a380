use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.push(&Notification::Success("Login successful".to_owned()));
    let b = state.push(&Notification::Error("Login failed".to_owned()));
    assert!(b > a);
    assert_eq!(state.items.len(), 2);
    assert!(!state.items[0].is_error);
    assert!(state.items[1].is_error);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push(&Notification::Success("one".to_owned()));
    let b = state.push(&Notification::Success("two".to_owned()));
    state.dismiss(a);
    assert_eq!(state.items.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b]);
    state.dismiss(a);
    assert_eq!(state.items.len(), 1);
}

#[test]
fn push_drops_oldest_beyond_limit() {
    let mut state = ToastState::default();
    for i in 0..=MAX_TOASTS {
        state.push(&Notification::Success(format!("toast {i}")));
    }
    assert_eq!(state.items.len(), MAX_TOASTS);
    assert_eq!(state.items[0].message, "toast 1");
}

#[test]
fn notifier_writes_into_signal() {
    let toasts = RwSignal::new(ToastState::default());
    let notify = toast_notifier(toasts);
    notify(Notification::Error("Invalid credentials".to_owned()));
    let items = toasts.get_untracked().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].message, "Invalid credentials");
    assert!(items[0].is_error);
}
