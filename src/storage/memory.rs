//! In-memory role store

use crate::auth::rbac::helpers::{
    duplicate_role_error, normalize_permissions, resolve_club_type, role_not_found,
    validate_role_name,
};
use crate::auth::rbac::{NewRole, Role, RoleUpdate};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use super::RoleStore;

/// Role store kept in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRoleStore {
    /// Roles and assignments behind a single lock so each mutation is atomic
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i32,
    roles: BTreeMap<i32, Role>,
    /// `(user_id, role_id)` to assignment time
    assignments: BTreeMap<(String, i32), DateTime<Utc>>,
}

impl MemoryState {
    fn name_taken(&self, name: &str, club_type: &str, except: Option<i32>) -> bool {
        self.roles
            .values()
            .any(|r| r.name == name && r.club_type == club_type && Some(r.id) != except)
    }
}

impl MemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored assignments
    pub fn assignment_count(&self) -> usize {
        self.state.read().assignments.len()
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn create_role(&self, role: NewRole) -> Result<Role> {
        let name = validate_role_name(&role.name)?;
        let club_type = resolve_club_type(role.club_type.as_deref())?;
        let permissions = normalize_permissions(&role.permissions)?;

        let mut state = self.state.write();
        if state.name_taken(&name, &club_type, None) {
            return Err(duplicate_role_error(&name, &club_type));
        }

        state.next_id += 1;
        let now = Utc::now();
        let created = Role {
            id: state.next_id,
            name,
            club_type,
            description: role.description.trim().to_string(),
            permissions,
            created_at: now,
            updated_at: now,
        };
        state.roles.insert(created.id, created.clone());

        debug!("Created role {} ({})", created.name, created.id);
        Ok(created)
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        Ok(self.state.read().roles.values().cloned().collect())
    }

    async fn get_role(&self, role_id: i32) -> Result<Option<Role>> {
        Ok(self.state.read().roles.get(&role_id).cloned())
    }

    async fn update_role(&self, role_id: i32, update: RoleUpdate) -> Result<Role> {
        let name = update.name.as_deref().map(validate_role_name).transpose()?;
        let club_type = update
            .club_type
            .as_deref()
            .map(|c| resolve_club_type(Some(c)))
            .transpose()?;
        let permissions = update
            .permissions
            .as_ref()
            .map(normalize_permissions)
            .transpose()?;

        let mut state = self.state.write();
        let current = state
            .roles
            .get(&role_id)
            .cloned()
            .ok_or_else(|| role_not_found(role_id))?;

        let mut updated = current;
        if let Some(name) = name {
            updated.name = name;
        }
        if let Some(club_type) = club_type {
            updated.club_type = club_type;
        }
        if let Some(description) = update.description {
            updated.description = description.trim().to_string();
        }
        if let Some(permissions) = permissions {
            updated.permissions = permissions;
        }

        if state.name_taken(&updated.name, &updated.club_type, Some(role_id)) {
            return Err(duplicate_role_error(&updated.name, &updated.club_type));
        }

        updated.updated_at = Utc::now();
        state.roles.insert(role_id, updated.clone());
        Ok(updated)
    }

    async fn delete_role(&self, role_id: i32) -> Result<()> {
        let mut state = self.state.write();
        if state.roles.remove(&role_id).is_none() {
            return Err(role_not_found(role_id));
        }
        state.assignments.retain(|(_, assigned), _| *assigned != role_id);

        debug!("Deleted role {} and its assignments", role_id);
        Ok(())
    }

    async fn assign_role(&self, user_id: &str, role_id: i32) -> Result<()> {
        let mut state = self.state.write();
        if !state.roles.contains_key(&role_id) {
            return Err(role_not_found(role_id));
        }
        state
            .assignments
            .entry((user_id.to_string(), role_id))
            .or_insert_with(Utc::now);
        Ok(())
    }

    async fn revoke_role(&self, user_id: &str, role_id: i32) -> Result<()> {
        self.state
            .write()
            .assignments
            .remove(&(user_id.to_string(), role_id));
        Ok(())
    }

    async fn roles_for_user(&self, user_id: &str) -> Result<Vec<Role>> {
        let state = self.state.read();
        let mut roles: Vec<Role> = state
            .assignments
            .keys()
            .filter(|(assigned_user, _)| assigned_user == user_id)
            .filter_map(|(_, role_id)| state.roles.get(role_id).cloned())
            .collect();
        roles.sort_by_key(|r| r.id);
        Ok(roles)
    }

    async fn roles_by_name(&self, names: &[String], club_type: Option<&str>) -> Result<Vec<Role>> {
        let club_type = club_type.map(crate::utils::normalize_club_type);
        let state = self.state.read();
        Ok(state
            .roles
            .values()
            .filter(|r| names.contains(&r.name))
            .filter(|r| club_type.as_deref().is_none_or(|c| r.club_type == c))
            .cloned()
            .collect())
    }

    async fn revoke_all_for_user(&self, user_id: &str) -> Result<u64> {
        let mut state = self.state.write();
        let before = state.assignments.len();
        state.assignments.retain(|(assigned_user, _), _| assigned_user != user_id);
        Ok((before - state.assignments.len()) as u64)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
