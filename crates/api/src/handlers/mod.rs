//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers resolve access via [`crate::access`], delegate storage to the
//! repositories in `colist_db`, and map errors via [`crate::error::AppError`].

pub mod auth;
pub mod categories;
pub mod items;
pub mod lists;
pub mod shares;
