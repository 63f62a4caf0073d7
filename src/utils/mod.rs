//! Utility modules
//!
//! - **error**: Error type shared by every module
//! - **logging**: Tracing subscriber setup

pub mod error; // Error handling
pub mod logging; // Logging setup

pub use error::{ClubhouseError, Result};

use std::time::{SystemTime, UNIX_EPOCH};

/// Get current timestamp in seconds
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Normalize a club type for storage and comparison
pub fn normalize_club_type(club_type: &str) -> String {
    club_type.trim().to_lowercase()
}
