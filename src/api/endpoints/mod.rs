//! API endpoint handlers.
//!
//! Handlers are thin: they lock the directory, make one call, and
//! serialize the result.

pub mod doctors;
pub mod health;
pub mod query;
