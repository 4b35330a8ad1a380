//! Route guards wrapping pages on either side of the auth boundary.
//!
//! DESIGN
//! ======
//! Both components derive a `GuardDecision` from the mirrored session signal
//! and either show a loading placeholder, render their children, or replace
//! the current history entry with the redirect target.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::{GuardDecision, RouteGuard};

use crate::state::auth::AuthContext;
use crate::util::auth::install_guard_redirect;

/// Login/register wrapper: signed-in users are sent to the home route.
#[component]
pub fn AuthRoute(children: ChildrenFn) -> impl IntoView {
    guarded(RouteGuard::PublicOnly, children)
}

/// Wrapper for pages that need a session. Waits for startup validation
/// before deciding, so a persisted login never flashes the login page.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    guarded(RouteGuard::AuthenticatedOnly, children)
}

fn guarded(guard: RouteGuard, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let routes = auth.routes.clone();
    let session = auth.session;
    let decision = Memo::new(move |_| session.with(|s| guard.decide(s, &routes)));

    install_guard_redirect(decision, use_navigate());

    move || match decision.get() {
        GuardDecision::Render => children(),
        GuardDecision::Loading | GuardDecision::Redirect { .. } => view! {
            <div class="route-loading" aria-busy="true">
                <span class="route-loading__spinner"></span>
                <p>"Loading..."</p>
            </div>
        }
        .into_any(),
    }
}
