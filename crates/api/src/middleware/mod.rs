//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- extracts the authenticated user from a JWT Bearer
//!   token, rejecting the request with 401 otherwise.
//! - [`auth::OptionalAuthUser`] -- same extraction, but yields `None` instead
//!   of rejecting when no valid token is present.

pub mod auth;
