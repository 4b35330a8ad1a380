//! Initialization mode: a scoped flag raised while startup validation runs.
//!
//! While active, global request side effects (401 → force logout and redirect)
//! are suppressed so a stale persisted token does not bounce the user mid-boot.
//! Entering returns a guard; the flag drops with it on every exit path.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared initialization-mode flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct InitializationMode {
    depth: Arc<AtomicUsize>,
}

impl InitializationMode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.depth.load(Ordering::Acquire) > 0
    }

    /// Raise the flag until the returned guard is dropped.
    #[must_use = "initialization mode ends when the guard is dropped"]
    pub fn enter(&self) -> InitModeGuard {
        self.depth.fetch_add(1, Ordering::AcqRel);
        InitModeGuard {
            depth: Arc::clone(&self.depth),
        }
    }
}

/// Keeps initialization mode active while alive.
#[derive(Debug)]
pub struct InitModeGuard {
    depth: Arc<AtomicUsize>,
}

impl Drop for InitModeGuard {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_scopes_the_flag() {
        let mode = InitializationMode::new();
        assert!(!mode.is_active());
        {
            let _guard = mode.enter();
            assert!(mode.is_active());
        }
        assert!(!mode.is_active());
    }

    #[test]
    fn nested_guards_keep_flag_until_last_drop() {
        let mode = InitializationMode::new();
        let outer = mode.enter();
        let inner = mode.clone().enter();
        drop(outer);
        assert!(mode.is_active());
        drop(inner);
        assert!(!mode.is_active());
    }

    #[test]
    fn guard_released_on_panic_unwind() {
        let mode = InitializationMode::new();
        let observer = mode.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = observer.enter();
            panic!("boom");
        });
        assert!(result.is_err());
        assert!(!mode.is_active());
    }
}
