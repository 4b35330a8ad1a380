//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::route_guard::{AuthRoute, ProtectedRoute};
use crate::components::toast_stack::ToastStack;
use crate::pages::{dashboard::DashboardPage, home::HomePage, login::LoginPage, register::RegisterPage};
use crate::state::auth::{AuthContext, build_config};
use crate::state::toasts::{ToastState, toast_notifier};

/// Root application component.
///
/// Builds the session controller, provides it to the route guards, and runs
/// startup validation once in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let toasts = RwSignal::new(ToastState::default());
    let auth = AuthContext::new(&build_config(), toast_notifier(toasts));
    provide_context(toasts);
    provide_context(auth.clone());

    #[cfg(feature = "csr")]
    {
        let controller = auth.controller.clone();
        leptos::task::spawn_local(async move {
            controller.initialize_auth().await;
        });
    }
    #[cfg(not(feature = "csr"))]
    let _ = auth;

    view! {
        <Title text="Ajarin.id"/>

        <Router>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route
                        path=StaticSegment("login")
                        view=|| view! { <AuthRoute><LoginPage/></AuthRoute> }
                    />
                    <Route
                        path=StaticSegment("register")
                        view=|| view! { <AuthRoute><RegisterPage/></AuthRoute> }
                    />
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                    />
                </Routes>
            </main>
            <ToastStack/>
        </Router>
    }
}
