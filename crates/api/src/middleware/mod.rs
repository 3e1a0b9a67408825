//! Request middleware that gates access to routes.
//!
//! - [`auth::require_token`] -- Requires the configured bearer token.

pub mod auth;
