//! Directory HTTP API.
//!
//! Exposes the directory as HTTP endpoints for the front end. Routes are
//! nested under `/api/`.
//!
//! The router is composable: `directory_api_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::directory_api_router;
pub use server::{start_server, DirectoryServer, ServerSession};
pub use types::ApiContext;
