//! JWT token handling
//!
//! This module provides access token creation and verification.

mod handler;
pub mod types;
mod utils;


pub use types::{Claims, JwtHandler};
