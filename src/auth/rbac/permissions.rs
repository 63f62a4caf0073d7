//! Permission resolution

use std::collections::{BTreeMap, BTreeSet};

use super::system::RbacSystem;
use super::types::{PermissionCheck, Role};
use crate::utils::error::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Source of a user's effective permissions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionResolver: Send + Sync {
    async fn effective_permissions(&self, user_id: &str) -> Result<BTreeSet<String>>;
}

impl RbacSystem {
    /// Roles implied by the user's external groups within this club type
    pub async fn group_implied_roles(&self, user_id: &str) -> Result<Vec<Role>> {
        let groups = match self.directory.groups_for_user(user_id).await {
            Ok(groups) => groups,
            Err(e) => {
                warn!("Group lookup for {} failed, ignoring groups: {}", user_id, e);
                return Ok(Vec::new());
            }
        };

        let names = self.groups.role_names(&groups);
        if names.is_empty() {
            return Ok(Vec::new());
        }

        self.store
            .roles_by_name(&names, Some(&self.club_type))
            .await
    }

    /// Direct and group-implied roles, ordered by id without duplicates
    pub async fn effective_roles(&self, user_id: &str) -> Result<Vec<Role>> {
        let mut roles: BTreeMap<i32, Role> = BTreeMap::new();
        for role in self.store.roles_for_user(user_id).await? {
            roles.insert(role.id, role);
        }
        for role in self.group_implied_roles(user_id).await? {
            roles.entry(role.id).or_insert(role);
        }
        Ok(roles.into_values().collect())
    }

    /// Union of the permissions of all effective roles
    ///
    /// Unknown users get an empty set.
    pub async fn effective_permissions(&self, user_id: &str) -> Result<BTreeSet<String>> {
        let permissions: BTreeSet<String> = self
            .effective_roles(user_id)
            .await?
            .into_iter()
            .flat_map(|role| role.permissions)
            .collect();

        debug!(
            "Resolved {} permissions for {}",
            permissions.len(),
            user_id
        );
        Ok(permissions)
    }

    /// Exact membership test
    pub async fn user_has_permission(&self, user_id: &str, permission: &str) -> Result<bool> {
        Ok(self.effective_permissions(user_id).await?.contains(permission))
    }

    /// Detailed permission check
    pub async fn check_permission_detailed(
        &self,
        user_id: &str,
        permission: &str,
    ) -> Result<PermissionCheck> {
        let granted_by_roles: Vec<String> = self
            .effective_roles(user_id)
            .await?
            .into_iter()
            .filter(|role| role.grants(permission))
            .map(|role| role.name)
            .collect();

        if granted_by_roles.is_empty() {
            Ok(PermissionCheck {
                granted: false,
                granted_by_roles,
                denial_reason: Some(format!("Missing permission: {}", permission)),
            })
        } else {
            Ok(PermissionCheck {
                granted: true,
                granted_by_roles,
                denial_reason: None,
            })
        }
    }
}

#[async_trait]
impl PermissionResolver for RbacSystem {
    async fn effective_permissions(&self, user_id: &str) -> Result<BTreeSet<String>> {
        RbacSystem::effective_permissions(self, user_id).await
    }
}
