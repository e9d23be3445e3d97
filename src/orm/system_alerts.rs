//! SeaORM Entity for system-wide emergency alerts

use crate::lifecycle::Deletable;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryFilter, Select};
use serde::{Deserialize, Serialize};

/// Severity level shown on the citizen banner
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "alert_severity")]
#[derive(Default)]
pub enum AlertSeverity {
    #[sea_orm(string_value = "info")]
    #[default]
    Info,
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "critical")]
    Critical,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "system_alerts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Hazard kind, e.g. "typhoon", "earthquake", "flood", "fire"
    pub alert_type: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub severity: AlertSeverity,
    /// Whether the alert is currently broadcast. Orthogonal to delete state.
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

    const RESOURCE: &'static str = "system-alerts";

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

    /// The broadcast flag doubles as the citizen-visibility toggle.
    fn visibility_column() -> Option<Column> {
        Some(Column::IsActive)
    }

    fn apply_search(select: Select<Entity>, term: &str) -> Select<Entity> {
        select.filter(
            Condition::any()
                .add(Column::Title.contains(term))
                .add(Column::Message.contains(term))
                .add(Column::AlertType.contains(term)),
        )
    }
}
