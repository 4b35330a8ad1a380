//! Login page: email + password sign-in.
//!
//! A successful login flips the session to authenticated, and the wrapping
//! `AuthRoute` redirects to the home route on its own.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
use session::Credentials;

use crate::state::auth::AuthContext;

/// Trim and check the form before it reaches the backend.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(Credentials::new(email, password))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let hint = RwSignal::new(None::<&'static str>);
    let session = auth.session;

    let busy = move || session.with(|s| s.is_loading);
    let message = move || hint.get().map(str::to_owned).or_else(|| session.with(|s| s.error.clone()));

    let controller = auth.controller.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy() {
            return;
        }
        let credentials = match validate_login_input(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(e) => {
                hint.set(Some(e));
                return;
            }
        };
        hint.set(None);

        #[cfg(feature = "csr")]
        {
            let controller = controller.clone();
            leptos::task::spawn_local(async move {
                if controller.login(&credentials).await.is_err() {
                    password.set(String::new());
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (&controller, credentials);
    };

    let controller = auth.controller.clone();
    let on_edit = move || {
        hint.set(None);
        if session.with_untracked(|s| s.error.is_some()) {
            controller.clear_error();
        }
    };
    let on_edit_password = on_edit.clone();

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Ajarin.id"</h1>
                <p class="login-card__subtitle">"Sign in to continue learning"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| {
                            email.set(event_target_value(&ev));
                            on_edit();
                        }
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            password.set(event_target_value(&ev));
                            on_edit_password();
                        }
                    />
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if busy() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || message().is_some()>
                    <p class="login-message login-message--error">{move || message().unwrap_or_default()}</p>
                </Show>
                <p class="login-card__footer">
                    "No account yet? "
                    <A href="/register">"Create one"</A>
                </p>
            </div>
        </div>
    }
}
