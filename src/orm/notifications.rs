//! SeaORM Entity for push notifications drafted in the admin console

use crate::lifecycle::Deletable;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryFilter, Select};
use serde::{Deserialize, Serialize};

/// Delivery status of a notification
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notification_status")]
#[derive(Default)]
pub enum NotificationStatus {
    /// Drafted, not yet handed to the push gateway
    #[sea_orm(string_value = "draft")]
    #[default]
    Draft,
    /// Accepted for delivery; the queued send may still be in flight
    #[sea_orm(string_value = "sent")]
    Sent,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    /// Recipient topics/device groups, JSON array of strings
    pub recipients: Json,
    pub status: NotificationStatus,
    pub sent_at: Option<DateTime>,
    pub created_by: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::admins::Entity",
        from = "Column::CreatedBy",
        to = "super::admins::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Creator,
}

impl Related<super::admins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Deletable for Entity {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;

    const RESOURCE: &'static str = "notifications";

    fn deleted_at_of(model: &Model) -> Option<DateTime> {
        model.deleted_at
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }

    fn deleted_at_column() -> Column {
        Column::DeletedAt
    }

    fn apply_search(select: Select<Entity>, term: &str) -> Select<Entity> {
        select.filter(
            Condition::any()
                .add(Column::Title.contains(term))
                .add(Column::Message.contains(term)),
        )
    }
}
