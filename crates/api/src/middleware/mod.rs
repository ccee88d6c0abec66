//! Session extractors used to gate handlers.
//!
//! - [`auth::SessionUser`] -- the logged-in user id, if any.
//! - [`auth::PageUser`] -- requires a login; redirects to `/login` otherwise.
//! - [`auth::ApiUser`] -- requires a login; JSON 401 otherwise.

pub mod auth;
