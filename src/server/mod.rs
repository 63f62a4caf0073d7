//! HTTP server implementation
//!
//! This module provides the HTTP server, its routes and the permission gate
//! middleware.

pub mod builder;
mod handlers;
pub mod middleware;
pub mod routes;
#[allow(clippy::module_inception)]
pub mod server;
pub mod state;

pub use builder::{ServerBuilder, run_server};
pub use server::{HttpServer, create_app};
pub use state::AppState;
