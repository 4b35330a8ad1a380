//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical redirect behavior, so both guards
//! funnel their decisions through `install_guard_redirect`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::GuardDecision;

/// Target and history mode for a redirect decision.
pub fn redirect_path(decision: &GuardDecision) -> Option<(&str, bool)> {
    match decision {
        GuardDecision::Redirect { to, replace } => Some((to.as_str(), *replace)),
        GuardDecision::Loading | GuardDecision::Render => None,
    }
}

/// Navigate whenever the guard decides the current page must not render.
pub fn install_guard_redirect<F>(decision: Memo<GuardDecision>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let decision = decision.get();
        if let Some((to, replace)) = redirect_path(&decision) {
            navigate(
                to,
                NavigateOptions {
                    replace,
                    ..NavigateOptions::default()
                },
            );
        }
    });
}
