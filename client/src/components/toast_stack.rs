//! Toast stack for controller notifications.

use leptos::prelude::*;

use crate::state::toasts::ToastState;

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || toasts.get().items
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = if toast.is_error { "toast toast--error" } else { "toast toast--success" };
                    view! {
                        <div class=class>
                            <span class="toast__message">{toast.message}</span>
                            <button
                                class="toast__close"
                                title="Dismiss"
                                on:click=move |_| toasts.update(|t| t.dismiss(id))
                            >
                                "x"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
