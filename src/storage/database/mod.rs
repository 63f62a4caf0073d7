//! Database storage implementation using SeaORM
//!
//! This module provides database connectivity and role persistence using SeaORM ORM.

/// Database entities module
pub mod entities;
/// SeaORM database implementation module
pub mod seaorm_db;

// Re-export the main database interface
pub use seaorm_db::DatabaseBackendType;
pub use seaorm_db::SeaOrmDatabase as Database;
