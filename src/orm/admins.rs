//! SeaORM Entity for the admins table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of an administrator account
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "admin_role")]
pub enum AdminRole {
    /// Full control, including lifecycle transitions and head admin management
    #[sea_orm(string_value = "superadmin")]
    SuperAdmin,
    /// Scoped admin managed by a superadmin
    #[sea_orm(string_value = "headadmin")]
    HeadAdmin,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: AdminRole,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::admin_tokens::Entity")]
    AdminTokens,
    #[sea_orm(has_many = "super::activity_logs::Entity")]
    ActivityLogs,
}

impl Related<super::admin_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminTokens.def()
    }
}

impl Related<super::activity_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
