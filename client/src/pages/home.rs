//! Public landing page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::AuthContext;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let home = auth.routes.home.clone();
    let login = auth.routes.login.clone();
    let session = auth.session;
    let signed_in = move || session.with(|s| s.is_authenticated());

    view! {
        <div class="home-page">
            <h1>"Ajarin.id"</h1>
            <p>"Learn anything, anywhere."</p>
            <Show
                when=signed_in
                fallback=move || {
                    let login = login.clone();
                    view! {
                        <A href=login>"Sign in"</A>
                        <A href="/register">"Create account"</A>
                    }
                }
            >
                <A href=home.clone()>"Go to dashboard"</A>
            </Show>
        </div>
    }
}
