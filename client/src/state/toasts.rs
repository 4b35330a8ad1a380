//! Transient toast notifications raised by session operations.

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

use leptos::prelude::*;
use session::Notification;

/// Milliseconds a toast stays on screen.
pub const TOAST_TTL_MS: u32 = 4_000;

/// Most toasts kept at once; older ones are dropped first.
pub const MAX_TOASTS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub is_error: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ToastState {
    next_id: u64,
    pub items: Vec<Toast>,
}

impl ToastState {
    /// Queue a notification, returning its id for later dismissal.
    pub fn push(&mut self, notification: &Notification) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            message: notification.message().to_owned(),
            is_error: notification.is_error(),
        });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}

/// Notifier that feeds the controller's notifications into `toasts`.
pub fn toast_notifier(toasts: RwSignal<ToastState>) -> impl Fn(Notification) + Send + Sync + 'static {
    move |notification: Notification| {
        let mut id = 0;
        toasts.update(|t| id = t.push(&notification));

        #[cfg(feature = "csr")]
        gloo_timers::callback::Timeout::new(TOAST_TTL_MS, move || {
            toasts.update(|t| t.dismiss(id));
        })
        .forget();
        #[cfg(not(feature = "csr"))]
        let _ = id;
    }
}
