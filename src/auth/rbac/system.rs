//! Core RBAC system implementation

use super::group_mapping::GroupRoleMapper;
use super::types::{NewRole, Role, RoleUpdate};
use crate::auth::directory::UserDirectory;
use crate::config::{RbacConfig, RoleSeed};
use crate::storage::RoleStore;
use crate::utils::error::{ClubhouseError, Result};
use crate::utils::normalize_club_type;
use std::sync::Arc;
use tracing::{debug, info};

/// RBAC system for managing roles and resolving permissions
#[derive(Clone)]
pub struct RbacSystem {
    /// Roles and assignments
    pub(super) store: Arc<dyn RoleStore>,
    /// Platform users and their groups
    pub(super) directory: Arc<dyn UserDirectory>,
    /// Group to role name mapping
    pub(super) groups: GroupRoleMapper,
    /// Club type of this installation
    pub(super) club_type: String,
}

impl std::fmt::Debug for RbacSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RbacSystem")
            .field("store", &self.store)
            .field("groups", &self.groups)
            .field("club_type", &self.club_type)
            .finish()
    }
}

impl RbacSystem {
    /// Create a new RBAC system
    pub fn new(
        config: &RbacConfig,
        store: Arc<dyn RoleStore>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            store,
            directory,
            groups: GroupRoleMapper::from_config(config),
            club_type: normalize_club_type(&config.club_type),
        }
    }

    /// Club type of this installation
    pub fn club_type(&self) -> &str {
        &self.club_type
    }

    pub fn store(&self) -> &Arc<dyn RoleStore> {
        &self.store
    }

    /// Create configured roles that do not exist yet
    pub async fn seed_roles(&self, seeds: &[RoleSeed]) -> Result<usize> {
        let mut created = 0;
        for seed in seeds {
            let club_type = seed.club_type.as_deref().unwrap_or(&self.club_type);
            let names = vec![seed.name.trim().to_string()];
            let existing = self.store.roles_by_name(&names, Some(club_type)).await?;
            if !existing.is_empty() {
                debug!("Seed role {} already present", seed.name);
                continue;
            }

            let role = NewRole {
                name: seed.name.clone(),
                club_type: Some(club_type.to_string()),
                description: seed.description.clone(),
                permissions: seed.permissions.clone(),
            };
            self.store.create_role(role).await?;
            created += 1;
        }

        if created > 0 {
            info!("Seeded {} default roles", created);
        }
        Ok(created)
    }

    /// Create a role in the given or the installation's club type
    pub async fn create_role(&self, mut role: NewRole) -> Result<Role> {
        if role.club_type.is_none() {
            role.club_type = Some(self.club_type.clone());
        }
        let created = self.store.create_role(role).await?;
        info!("Created role {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        self.store.list_roles().await
    }

    pub async fn get_role(&self, role_id: i32) -> Result<Role> {
        self.store
            .get_role(role_id)
            .await?
            .ok_or_else(|| ClubhouseError::not_found(format!("Role {}", role_id)))
    }

    pub async fn update_role(&self, role_id: i32, update: RoleUpdate) -> Result<Role> {
        if update.is_empty() {
            return self.get_role(role_id).await;
        }
        let updated = self.store.update_role(role_id, update).await?;
        info!("Updated role {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    pub async fn delete_role(&self, role_id: i32) -> Result<()> {
        self.store.delete_role(role_id).await?;
        info!("Deleted role {}", role_id);
        Ok(())
    }

    /// Assign a role to a user known to the directory
    pub async fn assign_role(&self, user_id: &str, role_id: i32) -> Result<()> {
        if !self.directory.user_exists(user_id).await? {
            return Err(ClubhouseError::not_found(format!("User {}", user_id)));
        }
        self.store.assign_role(user_id, role_id).await?;
        info!("Assigned role {} to {}", role_id, user_id);
        Ok(())
    }

    pub async fn revoke_role(&self, user_id: &str, role_id: i32) -> Result<()> {
        self.store.revoke_role(user_id, role_id).await?;
        info!("Revoked role {} from {}", role_id, user_id);
        Ok(())
    }

    /// Directly assigned roles of a user
    pub async fn roles_for_user(&self, user_id: &str) -> Result<Vec<Role>> {
        self.store.roles_for_user(user_id).await
    }

    /// Drop every assignment of a user removed from the platform
    pub async fn remove_user(&self, user_id: &str) -> Result<u64> {
        let removed = self.store.revoke_all_for_user(user_id).await?;
        info!("Removed {} role assignments of {}", removed, user_id);
        Ok(removed)
    }
}
