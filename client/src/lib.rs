//! # client
//!
//! Leptos + WASM frontend for Ajarin's sign-in flow.
//!
//! The session lifecycle itself lives in the `session` crate; this crate
//! supplies the browser pieces (cookie/localStorage Token Store, gloo-net
//! gateway), mirrors controller snapshots into a Leptos signal, and renders
//! the guarded routes.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point. Mounts [`app::App`] onto `<body>`.
#[cfg(feature = "csr")]
pub fn mount() {
    console_error_panic_hook::set_once();
    // The session crate logs through `tracing`, whose `log` feature forwards
    // into this logger.
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
