use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Name of the unique index over `(club_type, name)`
pub const UNIQUE_NAME_INDEX: &str = "idx_roles_club_type_name";

/// Role database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    /// Role ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Role name, unique per club type through [`UNIQUE_NAME_INDEX`]
    pub name: String,

    /// Normalized club type
    pub club_type: String,

    /// Role description
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Granted permissions as a JSON array
    #[sea_orm(column_type = "Text")]
    pub permissions: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Role entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Assignments of this role
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRole,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert database model to domain role
    pub fn to_domain_role(&self) -> crate::utils::error::Result<crate::auth::rbac::Role> {
        let permissions = serde_json::from_str(&self.permissions)?;

        Ok(crate::auth::rbac::Role {
            id: self.id,
            name: self.name.clone(),
            club_type: self.club_type.clone(),
            description: self.description.clone(),
            permissions,
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        })
    }
}
