//! Notification drafting and send endpoints
//!
//! Delivery itself is queued and asynchronous; see `crate::push`.

use super::deletable;
use crate::activities;
use crate::db::get_db_pool;
use crate::lifecycle::{self, Deletable, LifecycleError};
use crate::middleware::ClientCtx;
use crate::orm::notifications::{self, NotificationStatus};
use actix_web::{error, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::{entity::*, ActiveValue::Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(
        web::scope("/api/superadmin/notifications")
            .service(
                web::resource("")
                    .route(web::get().to(deletable::list::<notifications::Entity>))
                    .route(web::post().to(create_notification)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(deletable::view::<notifications::Entity>))
                    .route(web::put().to(update_notification))
                    .route(web::delete().to(deletable::soft_delete::<notifications::Entity>)),
            )
            .service(
                web::resource("/{id}/restore")
                    .route(web::post().to(deletable::restore::<notifications::Entity>)),
            )
            .service(
                web::resource("/{id}/permanent")
                    .route(web::delete().to(deletable::permanent_delete::<notifications::Entity>)),
            )
            .service(web::resource("/{id}/send").route(web::post().to(send_notification))),
    );
}

#[derive(Debug, Deserialize, Validate)]
struct NotificationForm {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    title: String,
    #[validate(length(min = 1, message = "Message is required"))]
    message: String,
    /// Recipient topics/device groups; empty means broadcast to all
    recipients: Option<Vec<String>>,
}

async fn create_notification(
    client: ClientCtx,
    form: web::Json<NotificationForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let now = Utc::now().naive_utc();
    let form = form.into_inner();
    let notification = notifications::ActiveModel {
        title: Set(form.title),
        message: Set(form.message),
        recipients: Set(serde_json::json!(form.recipients.unwrap_or_default())),
        status: Set(NotificationStatus::Draft),
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
        notifications::Entity::RESOURCE,
        notification.id,
        Some(notification.title.clone()),
    );

    Ok(HttpResponse::Created().json(notification))
}

async fn update_notification(
    client: ClientCtx,
    path: web::Path<i32>,
    form: web::Json<NotificationForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;
    let id = path.into_inner();

    let model = lifecycle::require_active::<notifications::Entity>(get_db_pool(), id).await?;

    let form = form.into_inner();
    let mut active: notifications::ActiveModel = model.into();
    active.title = Set(form.title);
    active.message = Set(form.message);
    if let Some(recipients) = form.recipients {
        active.recipients = Set(serde_json::json!(recipients));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active
        .update(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;

    activities::record_detached(
        Some(admin_id),
        "update",
        notifications::Entity::RESOURCE,
        id,
        Some(updated.title.clone()),
    );

    Ok(HttpResponse::Ok().json(updated))
}

#[derive(Serialize)]
struct SendResponse {
    message: String,
    data: notifications::Model,
}

/// Mark a draft notification as sent and queue push delivery.
/// The request returns once the send is queued, not delivered.
async fn send_notification(client: ClientCtx, path: web::Path<i32>) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    let id = path.into_inner();

    let model = lifecycle::require_active::<notifications::Entity>(get_db_pool(), id).await?;

    if model.status == NotificationStatus::Sent {
        return Err(LifecycleError::InvalidState {
            resource: notifications::Entity::RESOURCE,
            detail: "already sent".to_string(),
        }
        .into());
    }

    let mut active: notifications::ActiveModel = model.into();
    active.status = Set(NotificationStatus::Sent);
    active.sent_at = Set(Some(Utc::now().naive_utc()));

    let updated = active
        .update(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;

    crate::push::queue_push(updated.id);
    activities::record_detached(
        Some(admin_id),
        "send",
        notifications::Entity::RESOURCE,
        id,
        Some(updated.title.clone()),
    );

    Ok(HttpResponse::Ok().json(SendResponse {
        message: "Notification queued for delivery.".to_string(),
        data: updated,
    }))
}
