//! SeaORM Entity for filed accomplishment/incident reports
//!
//! The PDF itself is produced by an external generator; only the stored
//! paths are tracked here.

use crate::lifecycle::Deletable;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryFilter, Select};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    /// Report category, e.g. "accomplishment", "incident"
    pub category: String,
    /// Covered period, e.g. "2026-Q1"
    pub period: Option<String>,
    /// Stored path of the generated document
    pub file_path: Option<String>,
    /// Stored path of the signature image, if signed
    pub signature_path: Option<String>,
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

    const RESOURCE: &'static str = "reports";

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
                .add(Column::Category.contains(term))
                .add(Column::Period.contains(term)),
        )
    }

    fn asset_paths(model: &Model) -> Vec<String> {
        model
            .file_path
            .iter()
            .chain(model.signature_path.iter())
            .cloned()
            .collect()
    }
}
