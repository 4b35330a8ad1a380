//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates session changes to
//! the controller in `AuthContext`. Guards decide who may see a page.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod register;
