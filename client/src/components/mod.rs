//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared `AuthContext` and toast state from Leptos
//! context providers installed by `App`.

pub mod route_guard;
pub mod toast_stack;
