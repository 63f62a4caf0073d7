//! Storage layer for roles and role assignments
//!
//! Two interchangeable backends implement [`RoleStore`]: a SeaORM database
//! (SQLite or PostgreSQL) and an in-memory store used when the database is
//! disabled.

/// Database storage module
pub mod database;
/// In-memory storage module
pub mod memory;

use crate::auth::rbac::{NewRole, Role, RoleUpdate};
use crate::config::StorageConfig;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub use database::Database;
pub use memory::MemoryRoleStore;

/// Persistence for roles and user-role assignments
///
/// Every mutation is atomic. Assignment and revocation are idempotent.
#[async_trait]
pub trait RoleStore: Send + Sync + std::fmt::Debug {
    /// Create a role. Fails with a validation error on an empty name, an
    /// empty permission, or a name already used within the club type.
    async fn create_role(&self, role: NewRole) -> Result<Role>;

    /// All roles ordered by id
    async fn list_roles(&self) -> Result<Vec<Role>>;

    async fn get_role(&self, role_id: i32) -> Result<Option<Role>>;

    /// Apply a partial update
    async fn update_role(&self, role_id: i32, update: RoleUpdate) -> Result<Role>;

    /// Delete a role together with all of its assignments
    async fn delete_role(&self, role_id: i32) -> Result<()>;

    async fn assign_role(&self, user_id: &str, role_id: i32) -> Result<()>;

    async fn revoke_role(&self, user_id: &str, role_id: i32) -> Result<()>;

    /// Roles directly assigned to the user, ordered by id
    async fn roles_for_user(&self, user_id: &str) -> Result<Vec<Role>>;

    /// Roles whose name is one of `names`, optionally limited to a club type
    async fn roles_by_name(&self, names: &[String], club_type: Option<&str>) -> Result<Vec<Role>>;

    /// Remove every assignment of the user, returning how many were removed
    async fn revoke_all_for_user(&self, user_id: &str) -> Result<u64>;

    async fn health_check(&self) -> Result<()>;
}

/// Open the role store selected by configuration
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn RoleStore>> {
    if config.database.enabled {
        let database = Database::new(&config.database).await?;
        database.create_schema().await?;
        Ok(Arc::new(database))
    } else {
        info!("Database disabled, roles are kept in memory");
        Ok(Arc::new(MemoryRoleStore::new()))
    }
}
