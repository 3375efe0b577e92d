//! Authentication middleware and extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a Bearer token
//!   or the session cookie.
//! - [`page_gate::page_gate`] -- Redirects page requests by session state.

pub mod auth;
pub mod page_gate;
