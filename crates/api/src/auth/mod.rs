//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 token generation and validation.
//! - [`cookie`] -- `Set-Cookie` values carrying the token.

pub mod cookie;
pub mod jwt;
pub mod password;
