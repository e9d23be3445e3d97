//! SeaORM Entity for announcements

use crate::lifecycle::Deletable;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryFilter, Select};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// Stored photo paths, JSON array of strings
    pub photos: Json,
    pub visible_to_citizens: bool,
    pub featured: bool,
    pub created_by: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    /// Null while active; set when soft-deleted
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

    const RESOURCE: &'static str = "announcements";

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

    fn visibility_column() -> Option<Column> {
        Some(Column::VisibleToCitizens)
    }

    fn featured_column() -> Option<Column> {
        Some(Column::Featured)
    }

    fn apply_search(select: Select<Entity>, term: &str) -> Select<Entity> {
        select.filter(
            Condition::any()
                .add(Column::Title.contains(term))
                .add(Column::Content.contains(term)),
        )
    }

    fn asset_paths(model: &Model) -> Vec<String> {
        model
            .photos
            .as_array()
            .map(|photos| {
                photos
                    .iter()
                    .filter_map(|p| p.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}
