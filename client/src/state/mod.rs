//! Shared client state provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` carries the session controller plus a reactive mirror of its
//! snapshots; `toasts` holds transient notifications.

pub mod auth;
pub mod toasts;
