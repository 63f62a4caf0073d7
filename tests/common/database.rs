//! Test database utilities
//!
//! Each test gets an isolated in-memory SQLite database.

use clubhouse::config::DatabaseConfig;
use clubhouse::storage::{Database, MemoryRoleStore, RoleStore};
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new in-memory database with the schema in place
    pub async fn new() -> Self {
        let db = Database::new(&test_db_config())
            .await
            .expect("Failed to create in-memory test database");

        db.create_schema()
            .await
            .expect("Failed to create database schema");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// The database as a role store
    pub fn store(&self) -> Arc<dyn RoleStore> {
        self.inner.clone()
    }
}

/// Helper to create a simple test database config
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1, // In-memory DB only supports 1 connection
        connection_timeout: 5,
        enabled: true,
    }
}

/// One fresh store per backend, labelled for assertion messages
pub async fn all_backends() -> Vec<(&'static str, Arc<dyn RoleStore>)> {
    vec![
        ("memory", Arc::new(MemoryRoleStore::new()) as Arc<dyn RoleStore>),
        ("sqlite", TestDatabase::new().await.store()),
    ]
}
