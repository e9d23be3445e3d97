//! SeaORM Entity for associate volunteer groups

use crate::lifecycle::Deletable;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryFilter, Select};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "associate_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Group director or point of contact
    pub director: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Stored logo path
    pub logo_path: Option<String>,
    pub visible_to_citizens: bool,
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

    const RESOURCE: &'static str = "associate-groups";

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

    fn apply_search(select: Select<Entity>, term: &str) -> Select<Entity> {
        select.filter(
            Condition::any()
                .add(Column::Name.contains(term))
                .add(Column::Director.contains(term)),
        )
    }

    fn asset_paths(model: &Model) -> Vec<String> {
        model.logo_path.iter().cloned().collect()
    }
}
