//! Announcement management endpoints

use super::deletable;
use crate::activities;
use crate::db::get_db_pool;
use crate::lifecycle::{self, Deletable};
use crate::middleware::ClientCtx;
use crate::orm::announcements;
use actix_web::{error, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::{entity::*, ActiveValue::Set};
use serde::Deserialize;
use validator::Validate;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(
        web::scope("/api/superadmin/announcements")
            .service(
                web::resource("")
                    .route(web::get().to(deletable::list::<announcements::Entity>))
                    .route(web::post().to(create_announcement)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(deletable::view::<announcements::Entity>))
                    .route(web::put().to(update_announcement))
                    .route(web::delete().to(deletable::soft_delete::<announcements::Entity>)),
            )
            .service(
                web::resource("/{id}/restore")
                    .route(web::post().to(deletable::restore::<announcements::Entity>)),
            )
            .service(
                web::resource("/{id}/permanent")
                    .route(web::delete().to(deletable::permanent_delete::<announcements::Entity>)),
            )
            .service(
                web::resource("/{id}/visibility")
                    .route(web::put().to(deletable::toggle_visibility::<announcements::Entity>)),
            )
            .service(
                web::resource("/{id}/featured")
                    .route(web::put().to(deletable::toggle_featured::<announcements::Entity>)),
            ),
    );
}

#[derive(Debug, Deserialize, Validate)]
struct AnnouncementForm {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    content: String,
    /// Stored photo paths returned by the upload service
    photos: Option<Vec<String>>,
    visible_to_citizens: Option<bool>,
    featured: Option<bool>,
}

async fn create_announcement(
    client: ClientCtx,
    form: web::Json<AnnouncementForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let now = Utc::now().naive_utc();
    let form = form.into_inner();
    let announcement = announcements::ActiveModel {
        title: Set(form.title),
        content: Set(form.content),
        photos: Set(serde_json::json!(form.photos.unwrap_or_default())),
        visible_to_citizens: Set(form.visible_to_citizens.unwrap_or(false)),
        featured: Set(form.featured.unwrap_or(false)),
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
        announcements::Entity::RESOURCE,
        announcement.id,
        Some(announcement.title.clone()),
    );

    Ok(HttpResponse::Created().json(announcement))
}

async fn update_announcement(
    client: ClientCtx,
    path: web::Path<i32>,
    form: web::Json<AnnouncementForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;
    let id = path.into_inner();

    // Ordinary edits are only legal on Active rows.
    let model = lifecycle::require_active::<announcements::Entity>(get_db_pool(), id).await?;

    let form = form.into_inner();
    let mut active: announcements::ActiveModel = model.into();
    active.title = Set(form.title);
    active.content = Set(form.content);
    if let Some(photos) = form.photos {
        active.photos = Set(serde_json::json!(photos));
    }
    if let Some(visible) = form.visible_to_citizens {
        active.visible_to_citizens = Set(visible);
    }
    if let Some(featured) = form.featured {
        active.featured = Set(featured);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active
        .update(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;

    activities::record_detached(
        Some(admin_id),
        "update",
        announcements::Entity::RESOURCE,
        id,
        Some(updated.title.clone()),
    );

    Ok(HttpResponse::Ok().json(updated))
}
