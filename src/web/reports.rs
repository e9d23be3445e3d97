//! Report registry endpoints
//!
//! Documents are produced by the external report generator; this API
//! tracks the filed record and its stored paths.

use super::deletable;
use crate::activities;
use crate::db::get_db_pool;
use crate::lifecycle::{self, Deletable};
use crate::middleware::ClientCtx;
use crate::orm::reports;
use actix_web::{error, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::{entity::*, ActiveValue::Set};
use serde::Deserialize;
use validator::Validate;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(
        web::scope("/api/superadmin/reports")
            .service(
                web::resource("")
                    .route(web::get().to(deletable::list::<reports::Entity>))
                    .route(web::post().to(create_report)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(deletable::view::<reports::Entity>))
                    .route(web::put().to(update_report))
                    .route(web::delete().to(deletable::soft_delete::<reports::Entity>)),
            )
            .service(
                web::resource("/{id}/restore")
                    .route(web::post().to(deletable::restore::<reports::Entity>)),
            )
            .service(
                web::resource("/{id}/permanent")
                    .route(web::delete().to(deletable::permanent_delete::<reports::Entity>)),
            ),
    );
}

#[derive(Debug, Deserialize, Validate)]
struct ReportForm {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    title: String,
    #[validate(length(min = 1, max = 64, message = "Category must be 1-64 characters"))]
    category: String,
    period: Option<String>,
    /// Stored path of the generated document
    file_path: Option<String>,
    /// Stored path of the signature image
    signature_path: Option<String>,
}

async fn create_report(
    client: ClientCtx,
    form: web::Json<ReportForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let now = Utc::now().naive_utc();
    let form = form.into_inner();
    let report = reports::ActiveModel {
        title: Set(form.title),
        category: Set(form.category),
        period: Set(form.period),
        file_path: Set(form.file_path),
        signature_path: Set(form.signature_path),
        created_by: Set(Some(admin_id)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(get_db_pool())
    .await
    .map_err(error::ErrorInternalServerError)?;

    activities::record_detached(
        Some(admin_id),
        "create",
        reports::Entity::RESOURCE,
        report.id,
        Some(report.title.clone()),
    );

    Ok(HttpResponse::Created().json(report))
}

async fn update_report(
    client: ClientCtx,
    path: web::Path<i32>,
    form: web::Json<ReportForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;
    let id = path.into_inner();

    let model = lifecycle::require_active::<reports::Entity>(get_db_pool(), id).await?;

    let form = form.into_inner();
    let mut active: reports::ActiveModel = model.into();
    active.title = Set(form.title);
    active.category = Set(form.category);
    active.period = Set(form.period);
    if let Some(file_path) = form.file_path {
        active.file_path = Set(Some(file_path));
    }
    if let Some(signature_path) = form.signature_path {
        active.signature_path = Set(Some(signature_path));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active
        .update(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;

    activities::record_detached(
        Some(admin_id),
        "update",
        reports::Entity::RESOURCE,
        id,
        Some(updated.title.clone()),
    );

    Ok(HttpResponse::Ok().json(updated))
}
