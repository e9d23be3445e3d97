//! SeaORM Entity for head admin profiles managed by the superadmin console

use crate::lifecycle::Deletable;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryFilter, Select};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "head_admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub position: Option<String>,
    pub phone: Option<String>,
    /// Stored profile photo path
    pub photo_path: Option<String>,
    /// Whether the account may sign in. Orthogonal to the delete state.
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Deletable for Entity {
    type Entity = Entity;
    type Model = Model;
    type ActiveModel = ActiveModel;

    const RESOURCE: &'static str = "head-admins";

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
                .add(Column::Name.contains(term))
                .add(Column::Email.contains(term)),
        )
    }

    fn asset_paths(model: &Model) -> Vec<String> {
        model.photo_path.iter().cloned().collect()
    }
}
