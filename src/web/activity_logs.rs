//! Audit trail listing endpoints

use crate::db::get_db_pool;
use crate::lifecycle::Page;
use crate::middleware::ClientCtx;
use crate::orm::activity_logs;
use actix_web::{error, get, web, Error, HttpResponse};
use sea_orm::{entity::*, query::*, PaginatorTrait};
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_activity_logs);
}

#[derive(Debug, Deserialize)]
struct ActivityLogQuery {
    page: Option<u64>,
    per_page: Option<u64>,
    /// Narrow to one resource kind, e.g. "announcements"
    resource: Option<String>,
    /// Narrow to one action verb, e.g. "permanent_delete"
    action: Option<String>,
}

/// List audit entries, newest first.
#[get("/api/superadmin/activity-logs")]
async fn view_activity_logs(
    client: ClientCtx,
    query: web::Query<ActivityLogQuery>,
) -> Result<HttpResponse, Error> {
    client.require_admin()?;

    let limits = crate::app_config::limits();
    let per_page = query
        .per_page
        .unwrap_or(limits.per_page_default)
        .clamp(1, limits.per_page_max);
    let page = query.page.unwrap_or(1).max(1);

    let mut select = activity_logs::Entity::find()
        .order_by_desc(activity_logs::Column::CreatedAt)
        .order_by_desc(activity_logs::Column::Id);

    if let Some(resource) = query.resource.as_deref().filter(|r| !r.is_empty()) {
        select = select.filter(activity_logs::Column::Resource.eq(resource));
    }
    if let Some(action) = query.action.as_deref().filter(|a| !a.is_empty()) {
        select = select.filter(activity_logs::Column::Action.eq(action));
    }

    let paginator = select.paginate(get_db_pool(), per_page);
    let counts = paginator
        .num_items_and_pages()
        .await
        .map_err(error::ErrorInternalServerError)?;
    let data = paginator
        .fetch_page(page - 1)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(Page {
        data,
        current_page: page,
        last_page: counts.number_of_pages.max(1),
        per_page,
        total: counts.number_of_items,
    }))
}
