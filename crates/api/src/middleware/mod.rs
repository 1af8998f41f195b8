//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the authenticated caller, from the auth cookie or a Bearer token.

pub mod auth;
