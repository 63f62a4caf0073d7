//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

#![allow(missing_docs)]

pub mod app;
pub mod auth;
pub mod directory;
pub mod logging;
pub mod rbac;
pub mod reminders;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use app::*;
pub use auth::*;
pub use directory::*;
pub use logging::*;
pub use rbac::*;
pub use reminders::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

pub fn default_database_url() -> String {
    "sqlite://data/clubhouse.db?mode=rwc".to_string()
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_jwt_expiration() -> u64 {
    3600 // 1 hour
}

pub fn default_jwt_issuer() -> String {
    "clubhouse".to_string()
}

pub fn default_user_header() -> String {
    "X-Remote-User".to_string()
}

pub fn default_club_type() -> String {
    "general".to_string()
}

pub fn default_group_role_prefix() -> String {
    "club-".to_string()
}

pub fn default_audit_capacity() -> usize {
    256
}

pub fn default_reminder_interval_hours() -> u64 {
    24
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
