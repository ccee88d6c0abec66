//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- login session layer and the user id it carries.

pub mod password;
pub mod session;
