//! System alert management endpoints

use super::deletable;
use crate::activities;
use crate::db::get_db_pool;
use crate::lifecycle::{self, Deletable};
use crate::middleware::ClientCtx;
use crate::orm::system_alerts::{self, AlertSeverity};
use actix_web::{error, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::{entity::*, ActiveValue::Set};
use serde::Deserialize;
use validator::Validate;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(
        web::scope("/api/superadmin/system-alerts")
            .service(
                web::resource("")
                    .route(web::get().to(deletable::list::<system_alerts::Entity>))
                    .route(web::post().to(create_alert)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(deletable::view::<system_alerts::Entity>))
                    .route(web::put().to(update_alert))
                    .route(web::delete().to(deletable::soft_delete::<system_alerts::Entity>)),
            )
            .service(
                web::resource("/{id}/restore")
                    .route(web::post().to(deletable::restore::<system_alerts::Entity>)),
            )
            .service(
                web::resource("/{id}/permanent")
                    .route(web::delete().to(deletable::permanent_delete::<system_alerts::Entity>)),
            )
            // The broadcast flag doubles as citizen visibility.
            .service(
                web::resource("/{id}/visibility")
                    .route(web::put().to(deletable::toggle_visibility::<system_alerts::Entity>)),
            ),
    );
}

#[derive(Debug, Deserialize, Validate)]
struct SystemAlertForm {
    #[validate(length(min = 1, max = 64, message = "Alert type must be 1-64 characters"))]
    alert_type: String,
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    title: String,
    #[validate(length(min = 1, message = "Message is required"))]
    message: String,
    severity: Option<AlertSeverity>,
    is_active: Option<bool>,
}

async fn create_alert(
    client: ClientCtx,
    form: web::Json<SystemAlertForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let now = Utc::now().naive_utc();
    let form = form.into_inner();
    let alert = system_alerts::ActiveModel {
        alert_type: Set(form.alert_type),
        title: Set(form.title),
        message: Set(form.message),
        severity: Set(form.severity.unwrap_or_default()),
        is_active: Set(form.is_active.unwrap_or(false)),
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
        system_alerts::Entity::RESOURCE,
        alert.id,
        Some(alert.title.clone()),
    );

    Ok(HttpResponse::Created().json(alert))
}

async fn update_alert(
    client: ClientCtx,
    path: web::Path<i32>,
    form: web::Json<SystemAlertForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;
    let id = path.into_inner();

    let model = lifecycle::require_active::<system_alerts::Entity>(get_db_pool(), id).await?;

    let form = form.into_inner();
    let mut active: system_alerts::ActiveModel = model.into();
    active.alert_type = Set(form.alert_type);
    active.title = Set(form.title);
    active.message = Set(form.message);
    if let Some(severity) = form.severity {
        active.severity = Set(severity);
    }
    if let Some(is_active) = form.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active
        .update(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;

    activities::record_detached(
        Some(admin_id),
        "update",
        system_alerts::Entity::RESOURCE,
        id,
        Some(updated.title.clone()),
    );

    Ok(HttpResponse::Ok().json(updated))
}
