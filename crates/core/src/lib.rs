//! Shared domain types for the colist backend.
//!
//! This crate is deliberately thin: the id/timestamp aliases every other
//! crate builds on, and the [`error::CoreError`] taxonomy that the HTTP
//! layer maps to response codes.

pub mod error;
pub mod types;
