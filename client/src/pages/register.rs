//! Registration page. A new account is signed in immediately.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;
use session::RegisterRequest;

use crate::state::auth::AuthContext;

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

/// Roles a visitor may pick for themselves.
pub(crate) const ROLES: [(&str, &str); 2] = [("student", "Student"), ("tutor", "Tutor")];

pub(crate) fn validate_register_input(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    role: &str,
) -> Result<RegisterRequest, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Fill in your name, email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    let role = ROLES
        .iter()
        .find(|(value, _)| *value == role)
        .map(|(value, _)| (*value).to_owned());
    Ok(RegisterRequest {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        role,
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let role = RwSignal::new(ROLES[0].0.to_owned());
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
        let request = match validate_register_input(&name.get(), &email.get(), &password.get(), &confirm.get(), &role.get()) {
            Ok(request) => request,
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
                let _ = controller.register(&request).await;
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (&controller, request);
    };

    let controller = auth.controller.clone();
    let on_edit = move || {
        hint.set(None);
        if session.with_untracked(|s| s.error.is_some()) {
            controller.clear_error();
        }
    };

    let field = move |kind: &'static str, placeholder: &'static str, value: RwSignal<String>| {
        let on_edit = on_edit.clone();
        view! {
            <input
                class="login-input"
                type=kind
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    on_edit();
                }
            />
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Ajarin.id"</h1>
                <p class="login-card__subtitle">"Create your account"</p>
                <form class="login-form" on:submit=on_submit>
                    {field("text", "Full name", name)}
                    {field("email", "you@example.com", email)}
                    {field("password", "Password", password)}
                    {field("password", "Confirm password", confirm)}
                    <select
                        class="login-input"
                        prop:value=move || role.get()
                        on:change=move |ev| role.set(event_target_value(&ev))
                    >
                        {ROLES
                            .iter()
                            .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                            .collect_view()}
                    </select>
                    <button class="login-button" type="submit" disabled=busy>
                        {move || if busy() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <Show when=move || message().is_some()>
                    <p class="login-message login-message--error">{move || message().unwrap_or_default()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already registered? "
                    <A href="/login">"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
