//! Soft-delete lifecycle shared by every deletable admin resource.
//!
//! Each resource is in exactly one of three states:
//! - Active: `deleted_at` is null, visible in default listings
//! - SoftDeleted: `deleted_at` set, recoverable, hidden from default listings
//! - Gone: record physically removed along with its stored files
//!
//! The transitions are implemented once, generically over the entity type,
//! instead of being re-written per resource:
//!
//! ```text
//! [Active] --soft_delete--> [SoftDeleted] --permanent_delete--> [Gone]
//!     ^                          |
//!     +-------- restore ---------+
//! ```

use crate::storage::{StorageBackend, StorageError};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, ModelTrait, PaginatorTrait, PrimaryKeyTrait, QueryFilter,
    QueryOrder, Select, Value,
};
use serde::Serialize;

/// Lifecycle state derived from the `deleted_at` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Active,
    SoftDeleted,
}

/// A resource type governed by the soft-delete lifecycle.
///
/// Implemented by the sea-orm `Entity` unit struct of each deletable table.
/// The implementor exposes the columns the generic operations need; the
/// transition rules themselves live in the free functions of this module.
pub trait Deletable: Send + Sync + 'static
where
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: ModelTrait<Entity = Self::Entity>
        + IntoActiveModel<Self::ActiveModel>
        + FromQueryResult
        + Serialize
        + Send
        + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + 'static;

    /// Resource segment used in routes and activity log rows,
    /// e.g. "announcements".
    const RESOURCE: &'static str;

    fn deleted_at_of(model: &Self::Model) -> Option<NaiveDateTime>;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;
    fn created_at_column() -> <Self::Entity as EntityTrait>::Column;
    fn deleted_at_column() -> <Self::Entity as EntityTrait>::Column;

    /// Citizen-visibility flag, if the resource has one.
    fn visibility_column() -> Option<<Self::Entity as EntityTrait>::Column> {
        None
    }

    /// Featured flag, if the resource has one.
    fn featured_column() -> Option<<Self::Entity as EntityTrait>::Column> {
        None
    }

    /// Narrow a listing query by a free-text search term.
    fn apply_search(select: Select<Self::Entity>, term: &str) -> Select<Self::Entity>;

    /// Stored file paths that must be purged when the record is
    /// permanently deleted (photos, logos, signatures, documents).
    fn asset_paths(_model: &Self::Model) -> Vec<String> {
        Vec::new()
    }

    /// Current lifecycle state of a row.
    fn state_of(model: &Self::Model) -> LifecycleState {
        match Self::deleted_at_of(model) {
            None => LifecycleState::Active,
            Some(_) => LifecycleState::SoftDeleted,
        }
    }

    /// Read a boolean flag column off a model.
    fn flag_of(model: &Self::Model, column: <Self::Entity as EntityTrait>::Column) -> Option<bool> {
        match model.get(column) {
            Value::Bool(value) => value,
            _ => None,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Lifecycle operation errors.
#[derive(Debug)]
pub enum LifecycleError {
    /// No record for the given id
    NotFound(&'static str),
    /// Transition attempted from the wrong lifecycle state
    InvalidState {
        resource: &'static str,
        detail: String,
    },
    /// The record was erased but some associated files were not.
    /// The leftover paths are reported so an operator can reclaim them.
    PartialFailure {
        resource: &'static str,
        leftover: Vec<String>,
    },
    /// Database error
    Db(DbErr),
}

impl std::fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleError::NotFound(resource) => {
                write!(f, "No such record in {}", resource)
            }
            LifecycleError::InvalidState { resource, detail } => {
                write!(f, "Invalid state for {}: {}", resource, detail)
            }
            LifecycleError::PartialFailure { resource, leftover } => {
                write!(
                    f,
                    "Record erased from {} but {} stored file(s) could not be removed: {}",
                    resource,
                    leftover.len(),
                    leftover.join(", ")
                )
            }
            LifecycleError::Db(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for LifecycleError {}

impl From<DbErr> for LifecycleError {
    fn from(e: DbErr) -> Self {
        LifecycleError::Db(e)
    }
}

/// Structured JSON error body returned to the admin console.
#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl ResponseError for LifecycleError {
    fn status_code(&self) -> StatusCode {
        match self {
            LifecycleError::NotFound(_) => StatusCode::NOT_FOUND,
            LifecycleError::InvalidState { .. } => StatusCode::CONFLICT,
            LifecycleError::PartialFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            LifecycleError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = match self {
            LifecycleError::NotFound(_) => "not_found",
            LifecycleError::InvalidState { .. } => "invalid_state",
            LifecycleError::PartialFailure { .. } => "partial_failure",
            LifecycleError::Db(_) => "internal",
        };
        let message = match self {
            // Do not leak database internals to the client.
            LifecycleError::Db(e) => {
                log::error!("Lifecycle database error: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: code,
            message,
        })
    }
}

// ============================================================================
// Pagination envelope
// ============================================================================

/// Paginated listing response. `data` and `last_page` are the contract the
/// admin console consumes; the rest is bookkeeping it may ignore.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// Listing filter. `show_deleted` selects between the two mutually
/// exclusive views; a page never mixes active and soft-deleted rows.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub search: Option<String>,
    pub show_deleted: bool,
}

// ============================================================================
// Transitions
// ============================================================================

async fn find_required<R: Deletable>(
    db: &DatabaseConnection,
    id: i32,
) -> Result<R::Model, LifecycleError> {
    R::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(LifecycleError::NotFound(R::RESOURCE))
}

/// Fetch a row regardless of lifecycle state. `NotFound` once the row
/// is Gone.
pub async fn get<R: Deletable>(
    db: &DatabaseConnection,
    id: i32,
) -> Result<R::Model, LifecycleError> {
    find_required::<R>(db, id).await
}

/// Transition Active -> SoftDeleted by stamping `deleted_at`.
///
/// Soft-deleting an already soft-deleted row is refused with
/// `InvalidState` so the console detects stale state; the original
/// `deleted_at` is never overwritten.
pub async fn soft_delete<R: Deletable>(
    db: &DatabaseConnection,
    id: i32,
) -> Result<R::Model, LifecycleError> {
    let model = find_required::<R>(db, id).await?;

    if R::deleted_at_of(&model).is_some() {
        return Err(LifecycleError::InvalidState {
            resource: R::RESOURCE,
            detail: "already soft-deleted".to_string(),
        });
    }

    let now = Utc::now().naive_utc();
    let mut active = model.into_active_model();
    active.set(R::deleted_at_column(), Some(now).into());
    let updated = active.update(db).await?;

    Ok(updated)
}

/// Transition SoftDeleted -> Active by clearing `deleted_at`.
///
/// Restoring a row that is not soft-deleted fails fast with
/// `InvalidState` rather than silently succeeding.
pub async fn restore<R: Deletable>(
    db: &DatabaseConnection,
    id: i32,
) -> Result<R::Model, LifecycleError> {
    let model = find_required::<R>(db, id).await?;

    if R::deleted_at_of(&model).is_none() {
        return Err(LifecycleError::InvalidState {
            resource: R::RESOURCE,
            detail: "not soft-deleted, nothing to restore".to_string(),
        });
    }

    let mut active = model.into_active_model();
    active.set(R::deleted_at_column(), Option::<NaiveDateTime>::None.into());
    let updated = active.update(db).await?;

    Ok(updated)
}

/// Transition SoftDeleted -> Gone. Irreversible.
///
/// Only legal from the SoftDeleted state; the two-step destructive flow is
/// enforced server-side, not just hidden in the console. The record is
/// erased first, then the associated files. File removal failures are
/// surfaced as `PartialFailure` and never retried: a leftover file is a
/// resource leak, while a half-deleted record would be corruption.
pub async fn permanent_delete<R: Deletable>(
    db: &DatabaseConnection,
    storage: &dyn StorageBackend,
    id: i32,
) -> Result<(), LifecycleError> {
    let model = find_required::<R>(db, id).await?;

    if R::deleted_at_of(&model).is_none() {
        return Err(LifecycleError::InvalidState {
            resource: R::RESOURCE,
            detail: "must be soft-deleted before permanent deletion".to_string(),
        });
    }

    let assets = R::asset_paths(&model);

    R::Entity::delete_by_id(id).exec(db).await?;

    let mut leftover = Vec::new();
    for path in assets {
        match storage.delete_object(&path).await {
            Ok(()) => {}
            // Already gone is fine, the goal is absence.
            Err(StorageError::NotFound(_)) => {}
            Err(e) => {
                log::warn!(
                    "Failed to remove stored file {} for {} #{}: {}",
                    path,
                    R::RESOURCE,
                    id,
                    e
                );
                leftover.push(path);
            }
        }
    }

    if !leftover.is_empty() {
        return Err(LifecycleError::PartialFailure {
            resource: R::RESOURCE,
            leftover,
        });
    }

    Ok(())
}

/// Paginated listing of one lifecycle view.
///
/// Default view excludes soft-deleted rows; `show_deleted` flips to the
/// tombstone view. Ordering is newest-first with the id as tie-breaker so
/// pages are stable for a fixed filter.
pub async fn list<R: Deletable>(
    db: &DatabaseConnection,
    filter: &ListFilter,
) -> Result<Page<R::Model>, LifecycleError> {
    let limits = crate::app_config::limits();
    let per_page = filter
        .per_page
        .unwrap_or(limits.per_page_default)
        .clamp(1, limits.per_page_max);
    let page = filter.page.unwrap_or(1).max(1);

    let mut select = R::Entity::find();
    select = if filter.show_deleted {
        select.filter(R::deleted_at_column().is_not_null())
    } else {
        select.filter(R::deleted_at_column().is_null())
    };

    if let Some(term) = filter.search.as_deref() {
        let term = term.trim();
        if !term.is_empty() {
            select = R::apply_search(select, term);
        }
    }

    select = select
        .order_by_desc(R::created_at_column())
        .order_by_desc(R::id_column());

    let paginator = select.paginate(db, per_page);
    let counts = paginator.num_items_and_pages().await?;
    let data = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        data,
        current_page: page,
        last_page: counts.number_of_pages.max(1),
        per_page,
        total: counts.number_of_items,
    })
}

/// Which boolean flag a toggle endpoint addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleFlag {
    Visibility,
    Featured,
}

impl ToggleFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleFlag::Visibility => "visibility",
            ToggleFlag::Featured => "featured",
        }
    }
}

/// Flip a visibility/featured flag on an Active resource.
///
/// Refused with `InvalidState` while the resource is soft-deleted, so
/// deleted content can never be leaked into citizen-facing views through
/// flag manipulation.
pub async fn toggle_flag<R: Deletable>(
    db: &DatabaseConnection,
    id: i32,
    flag: ToggleFlag,
) -> Result<R::Model, LifecycleError> {
    let column = match flag {
        ToggleFlag::Visibility => R::visibility_column(),
        ToggleFlag::Featured => R::featured_column(),
    }
    .ok_or(LifecycleError::NotFound(R::RESOURCE))?;

    let model = find_required::<R>(db, id).await?;

    if R::deleted_at_of(&model).is_some() {
        return Err(LifecycleError::InvalidState {
            resource: R::RESOURCE,
            detail: format!("cannot toggle {} on a soft-deleted resource", flag.as_str()),
        });
    }

    let current = R::flag_of(&model, column).unwrap_or(false);
    let mut active = model.into_active_model();
    active.set(column, Value::Bool(Some(!current)));
    let updated = active.update(db).await?;

    Ok(updated)
}

/// Guard for ordinary field updates: the row must exist and be Active.
pub async fn require_active<R: Deletable>(
    db: &DatabaseConnection,
    id: i32,
) -> Result<R::Model, LifecycleError> {
    let model = find_required::<R>(db, id).await?;
    if R::deleted_at_of(&model).is_some() {
        return Err(LifecycleError::InvalidState {
            resource: R::RESOURCE,
            detail: "soft-deleted resources cannot be edited".to_string(),
        });
    }
    Ok(model)
}
