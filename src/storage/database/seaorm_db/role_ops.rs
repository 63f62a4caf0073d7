use crate::auth::rbac::helpers::{
    duplicate_role_error, normalize_permissions, resolve_club_type, role_not_found,
    validate_role_name,
};
use crate::auth::rbac::{NewRole, Role, RoleUpdate};
use crate::storage::RoleStore;
use crate::utils::error::{ClubhouseError, Result};
use crate::utils::normalize_club_type;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, role, user_role};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Whether `(club_type, name)` is used by a role other than `except`
    async fn role_name_taken<C: ConnectionTrait>(
        conn: &C,
        name: &str,
        club_type: &str,
        except: Option<i32>,
    ) -> Result<bool> {
        let mut query = entities::Role::find()
            .filter(role::Column::Name.eq(name))
            .filter(role::Column::ClubType.eq(club_type));
        if let Some(role_id) = except {
            query = query.filter(role::Column::Id.ne(role_id));
        }

        let count = query.count(conn).await.map_err(ClubhouseError::Database)?;
        Ok(count > 0)
    }

    /// Map a failed role write, turning a lost race on the unique name index
    /// into the same error the pre-check reports
    pub(super) fn role_write_error(err: DbErr, name: &str, club_type: &str) -> ClubhouseError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_role_error(name, club_type),
            _ => ClubhouseError::Database(err),
        }
    }

    fn to_domain_roles(models: Vec<role::Model>) -> Result<Vec<Role>> {
        models.iter().map(role::Model::to_domain_role).collect()
    }
}

#[async_trait]
impl RoleStore for SeaOrmDatabase {
    async fn create_role(&self, new_role: NewRole) -> Result<Role> {
        let name = validate_role_name(&new_role.name)?;
        let club_type = resolve_club_type(new_role.club_type.as_deref())?;
        let permissions = normalize_permissions(&new_role.permissions)?;
        debug!("Creating role {} for club type {}", name, club_type);

        let txn = self.db.begin().await.map_err(ClubhouseError::Database)?;

        if Self::role_name_taken(&txn, &name, &club_type, None).await? {
            return Err(duplicate_role_error(&name, &club_type));
        }

        let now = chrono::Utc::now();
        let active_model = role::ActiveModel {
            id: NotSet,
            name: Set(name.clone()),
            club_type: Set(club_type.clone()),
            description: Set(new_role.description.trim().to_string()),
            permissions: Set(serde_json::to_string(&permissions)?),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = active_model
            .insert(&txn)
            .await
            .map_err(|e| Self::role_write_error(e, &name, &club_type))?;
        txn.commit().await.map_err(ClubhouseError::Database)?;

        inserted.to_domain_role()
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        let models = entities::Role::find()
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await
            .map_err(ClubhouseError::Database)?;

        Self::to_domain_roles(models)
    }

    async fn get_role(&self, role_id: i32) -> Result<Option<Role>> {
        let model = entities::Role::find_by_id(role_id)
            .one(&self.db)
            .await
            .map_err(ClubhouseError::Database)?;

        model.as_ref().map(role::Model::to_domain_role).transpose()
    }

    async fn update_role(&self, role_id: i32, update: RoleUpdate) -> Result<Role> {
        debug!("Updating role {}", role_id);

        let txn = self.db.begin().await.map_err(ClubhouseError::Database)?;

        let current = entities::Role::find_by_id(role_id)
            .one(&txn)
            .await
            .map_err(ClubhouseError::Database)?
            .ok_or_else(|| role_not_found(role_id))?;

        let name = match update.name.as_deref() {
            Some(name) => validate_role_name(name)?,
            None => current.name.clone(),
        };
        let club_type = match update.club_type.as_deref() {
            Some(club_type) => resolve_club_type(Some(club_type))?,
            None => current.club_type.clone(),
        };

        if Self::role_name_taken(&txn, &name, &club_type, Some(role_id)).await? {
            return Err(duplicate_role_error(&name, &club_type));
        }

        let mut active_model: role::ActiveModel = current.into();
        active_model.name = Set(name.clone());
        active_model.club_type = Set(club_type.clone());
        if let Some(description) = update.description {
            active_model.description = Set(description.trim().to_string());
        }
        if let Some(permissions) = update.permissions {
            let permissions = normalize_permissions(&permissions)?;
            active_model.permissions = Set(serde_json::to_string(&permissions)?);
        }
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model
            .update(&txn)
            .await
            .map_err(|e| Self::role_write_error(e, &name, &club_type))?;
        txn.commit().await.map_err(ClubhouseError::Database)?;

        updated.to_domain_role()
    }

    async fn delete_role(&self, role_id: i32) -> Result<()> {
        debug!("Deleting role {}", role_id);

        let txn = self.db.begin().await.map_err(ClubhouseError::Database)?;

        let result = entities::Role::delete_by_id(role_id)
            .exec(&txn)
            .await
            .map_err(ClubhouseError::Database)?;
        if result.rows_affected == 0 {
            return Err(role_not_found(role_id));
        }

        let removed = entities::UserRole::delete_many()
            .filter(user_role::Column::RoleId.eq(role_id))
            .exec(&txn)
            .await
            .map_err(ClubhouseError::Database)?;

        txn.commit().await.map_err(ClubhouseError::Database)?;

        debug!(
            "Deleted role {} and {} assignments",
            role_id, removed.rows_affected
        );
        Ok(())
    }

    async fn assign_role(&self, user_id: &str, role_id: i32) -> Result<()> {
        debug!("Assigning role {} to {}", role_id, user_id);

        let txn = self.db.begin().await.map_err(ClubhouseError::Database)?;

        let exists = entities::Role::find_by_id(role_id)
            .count(&txn)
            .await
            .map_err(ClubhouseError::Database)?
            > 0;
        if !exists {
            return Err(role_not_found(role_id));
        }

        let assignment = user_role::ActiveModel {
            user_id: Set(user_id.to_string()),
            role_id: Set(role_id),
            created_at: Set(chrono::Utc::now().into()),
        };

        entities::UserRole::insert(assignment)
            .on_conflict(
                OnConflict::columns([user_role::Column::UserId, user_role::Column::RoleId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .map_err(ClubhouseError::Database)?;

        txn.commit().await.map_err(ClubhouseError::Database)?;
        Ok(())
    }

    async fn revoke_role(&self, user_id: &str, role_id: i32) -> Result<()> {
        debug!("Revoking role {} from {}", role_id, user_id);

        entities::UserRole::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(user_role::Column::RoleId.eq(role_id))
            .exec(&self.db)
            .await
            .map_err(ClubhouseError::Database)?;

        Ok(())
    }

    async fn roles_for_user(&self, user_id: &str) -> Result<Vec<Role>> {
        let models = entities::Role::find()
            .inner_join(entities::UserRole)
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await
            .map_err(ClubhouseError::Database)?;

        Self::to_domain_roles(models)
    }

    async fn roles_by_name(&self, names: &[String], club_type: Option<&str>) -> Result<Vec<Role>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = entities::Role::find()
            .filter(role::Column::Name.is_in(names.iter().map(String::as_str)));
        if let Some(club_type) = club_type {
            query = query.filter(role::Column::ClubType.eq(normalize_club_type(club_type)));
        }

        let models = query
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await
            .map_err(ClubhouseError::Database)?;

        Self::to_domain_roles(models)
    }

    async fn revoke_all_for_user(&self, user_id: &str) -> Result<u64> {
        let result = entities::UserRole::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(ClubhouseError::Database)?;

        debug!(
            "Removed {} assignments of {}",
            result.rows_affected, user_id
        );
        Ok(result.rows_affected)
    }

    async fn health_check(&self) -> Result<()> {
        self.ping().await
    }
}
