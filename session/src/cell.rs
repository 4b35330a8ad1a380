//! Observable container holding the current `Session`.
//!
//! ARCHITECTURE
//! ============
//! The controller is the only writer. Readers either take a snapshot or
//! subscribe; the Leptos client forwards every published snapshot into a
//! signal. Subscribers run after the lock is released so they may read the
//! cell again without deadlocking.

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::state::Session;

type Subscriber = Arc<dyn Fn(&Session) + Send + Sync>;

/// Handle returned by [`SessionCell::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct CellInner {
    session: Session,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

/// Shared, cloneable session state with change notification.
#[derive(Clone, Default)]
pub struct SessionCell {
    inner: Arc<Mutex<CellInner>>,
}

impl SessionCell {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.lock().session.clone()
    }

    /// Read part of the state without cloning all of it.
    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.lock().session)
    }

    /// Register a callback invoked with every published snapshot.
    pub fn subscribe(&self, f: impl Fn(&Session) + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(f)));
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sub, _)| *sub != id);
        inner.subscribers.len() != before
    }

    /// Apply `f` and publish the result as one snapshot.
    ///
    /// `is_initialized` is sticky: once a published snapshot carried `true`,
    /// no later update can lower it.
    pub(crate) fn update(&self, f: impl FnOnce(&mut Session)) -> Session {
        let (snapshot, subscribers) = {
            let mut inner = self.lock();
            let was_initialized = inner.session.is_initialized;
            f(&mut inner.session);
            inner.session.is_initialized |= was_initialized;
            let subscribers: Vec<Subscriber> = inner.subscribers.iter().map(|(_, s)| Arc::clone(s)).collect();
            (inner.session.clone(), subscribers)
        };
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
        snapshot
    }

    fn lock(&self) -> MutexGuard<'_, CellInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("SessionCell")
            .field("session", &inner.session)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}
