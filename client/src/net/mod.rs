//! Networking for the browser client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the Remote Auth Gateway over `gloo-net`; wire types and
//! response decoding are shared with native callers through the `session`
//! crate.

pub mod api;
