//! Generic HTTP handlers for the soft-delete lifecycle.
//!
//! Every deletable resource mounts these same handlers; the per-resource
//! modules only add their own create/update routes. Lifecycle transitions
//! require the superadmin role and are recorded in the activity log.

use crate::activities;
use crate::db::get_db_pool;
use crate::lifecycle::{self, Deletable, ListFilter, ToggleFlag};
use crate::middleware::ClientCtx;
use crate::storage::StorageBackend;
use actix_web::{web, Error, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters accepted by every listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub search: Option<String>,
    /// Flips to the tombstone view. The two views are never mixed.
    #[serde(default)]
    pub show_deleted: bool,
}

#[derive(Serialize)]
struct TransitionResponse<T: Serialize> {
    message: String,
    data: T,
}

#[derive(Serialize)]
struct GoneResponse {
    message: String,
}

/// List one lifecycle view of a resource, paginated.
pub async fn list<R>(client: ClientCtx, query: web::Query<ListQuery>) -> Result<HttpResponse, Error>
where
    R: Deletable,
{
    client.require_admin()?;

    let query = query.into_inner();
    let filter = ListFilter {
        page: query.page,
        per_page: query.per_page,
        search: query.search,
        show_deleted: query.show_deleted,
    };

    let page = lifecycle::list::<R>(get_db_pool(), &filter).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Fetch a single resource, whether active or soft-deleted.
pub async fn view<R>(client: ClientCtx, path: web::Path<i32>) -> Result<HttpResponse, Error>
where
    R: Deletable,
{
    client.require_admin()?;

    let model = lifecycle::get::<R>(get_db_pool(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(model))
}

/// Soft delete: Active -> SoftDeleted.
pub async fn soft_delete<R>(client: ClientCtx, path: web::Path<i32>) -> Result<HttpResponse, Error>
where
    R: Deletable,
{
    let admin_id = client.require_superadmin()?;
    let id = path.into_inner();

    let model = lifecycle::soft_delete::<R>(get_db_pool(), id).await?;
    activities::record_detached(Some(admin_id), "soft_delete", R::RESOURCE, id, None);

    Ok(HttpResponse::Ok().json(TransitionResponse {
        message: "Resource moved to the deleted view. It can be restored.".to_string(),
        data: model,
    }))
}

/// Restore: SoftDeleted -> Active.
pub async fn restore<R>(client: ClientCtx, path: web::Path<i32>) -> Result<HttpResponse, Error>
where
    R: Deletable,
{
    let admin_id = client.require_superadmin()?;
    let id = path.into_inner();

    let model = lifecycle::restore::<R>(get_db_pool(), id).await?;
    activities::record_detached(Some(admin_id), "restore", R::RESOURCE, id, None);

    Ok(HttpResponse::Ok().json(TransitionResponse {
        message: "Resource restored.".to_string(),
        data: model,
    }))
}

/// Permanent delete: SoftDeleted -> Gone. Irreversible.
pub async fn permanent_delete<R>(
    client: ClientCtx,
    storage: web::Data<Arc<dyn StorageBackend>>,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error>
where
    R: Deletable,
{
    let admin_id = client.require_superadmin()?;
    let id = path.into_inner();

    lifecycle::permanent_delete::<R>(get_db_pool(), storage.get_ref().as_ref(), id).await?;
    activities::record_detached(Some(admin_id), "permanent_delete", R::RESOURCE, id, None);

    Ok(HttpResponse::Ok().json(GoneResponse {
        message: "Resource permanently deleted.".to_string(),
    }))
}

async fn toggle<R>(client: ClientCtx, id: i32, flag: ToggleFlag) -> Result<HttpResponse, Error>
where
    R: Deletable,
{
    let admin_id = client.require_superadmin()?;

    let model = lifecycle::toggle_flag::<R>(get_db_pool(), id, flag).await?;
    let action = match flag {
        ToggleFlag::Visibility => "toggle_visibility",
        ToggleFlag::Featured => "toggle_featured",
    };
    activities::record_detached(Some(admin_id), action, R::RESOURCE, id, None);

    Ok(HttpResponse::Ok().json(TransitionResponse {
        message: format!("Toggled {}.", flag.as_str()),
        data: model,
    }))
}

/// Toggle the citizen-visibility flag. Rejected while soft-deleted.
pub async fn toggle_visibility<R>(
    client: ClientCtx,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error>
where
    R: Deletable,
{
    toggle::<R>(client, path.into_inner(), ToggleFlag::Visibility).await
}

/// Toggle the featured flag. Rejected while soft-deleted.
pub async fn toggle_featured<R>(
    client: ClientCtx,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error>
where
    R: Deletable,
{
    toggle::<R>(client, path.into_inner(), ToggleFlag::Featured).await
}
