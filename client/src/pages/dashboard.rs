//! Dashboard page: the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wrapped in `ProtectedRoute`, so it only renders once startup validation has
//! confirmed a session. Logging out flips the session to anonymous and the
//! guard sends the visitor back to the login route.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use session::User;

use crate::state::auth::AuthContext;

/// Up to two initials for the avatar fallback.
pub(crate) fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Role label shown under the user's name.
pub(crate) fn role_label(user: &User) -> &str {
    match user.role.as_deref() {
        Some("tutor") => "Tutor",
        Some("admin") => "Administrator",
        Some("student") | None => "Student",
        Some(other) => other,
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let session = auth.session;
    let refreshing = RwSignal::new(false);
    let user = move || session.with(|s| s.user().cloned());

    let controller = auth.controller.clone();
    let on_refresh = move |_| {
        if refreshing.get() {
            return;
        }
        refreshing.set(true);
        #[cfg(feature = "csr")]
        {
            let controller = controller.clone();
            leptos::task::spawn_local(async move {
                if !controller.refresh_user().await {
                    log::info!("profile refresh failed; keeping cached profile");
                }
                refreshing.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &controller;
            refreshing.set(false);
        }
    };

    let controller = auth.controller.clone();
    let on_logout = move |_| {
        #[cfg(feature = "csr")]
        {
            let controller = controller.clone();
            leptos::task::spawn_local(async move {
                controller.logout().await;
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = &controller;
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>"Ajarin.id"</h1>
                <button class="btn btn--ghost" on:click=on_logout>"Log out"</button>
            </header>
            {move || {
                user()
                    .map(|user| {
                        let avatar = user.avatar.clone();
                        let name = user.name.clone();
                        view! {
                            <section class="profile-card">
                                {match avatar {
                                    Some(src) => view! { <img class="profile-card__avatar" src=src alt=name.clone()/> }.into_any(),
                                    None => view! { <span class="profile-card__avatar">{initials(&name)}</span> }.into_any(),
                                }}
                                <div class="profile-card__body">
                                    <h2>{format!("Welcome back, {name}")}</h2>
                                    <p class="profile-card__role">{role_label(&user).to_owned()}</p>
                                    <p class="profile-card__email">{user.email.clone().unwrap_or_default()}</p>
                                </div>
                            </section>
                        }
                    })
            }}
            <button class="btn" on:click=on_refresh disabled=move || refreshing.get()>
                {move || if refreshing.get() { "Refreshing..." } else { "Refresh profile" }}
            </button>
        </div>
    }
}
