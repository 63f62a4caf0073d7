use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role assignment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_roles")]
pub struct Model {
    /// Platform user ID
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,

    /// Assigned role
    #[sea_orm(primary_key, auto_increment = false)]
    pub role_id: i32,

    /// Assignment timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// User role entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to role relation
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_delete = "Cascade"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
