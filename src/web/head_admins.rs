//! Head admin profile management endpoints
//!
//! Head admin profiles are records managed by the superadmin; sign-in
//! credentials live with the auth service, not here.

use super::deletable;
use crate::activities;
use crate::db::get_db_pool;
use crate::lifecycle::{self, Deletable};
use crate::middleware::ClientCtx;
use crate::orm::head_admins;
use actix_web::{error, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::{entity::*, ActiveValue::Set};
use serde::Deserialize;
use validator::Validate;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(
        web::scope("/api/superadmin/head-admins")
            .service(
                web::resource("")
                    .route(web::get().to(deletable::list::<head_admins::Entity>))
                    .route(web::post().to(create_head_admin)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(deletable::view::<head_admins::Entity>))
                    .route(web::put().to(update_head_admin))
                    .route(web::delete().to(deletable::soft_delete::<head_admins::Entity>)),
            )
            .service(
                web::resource("/{id}/restore")
                    .route(web::post().to(deletable::restore::<head_admins::Entity>)),
            )
            .service(
                web::resource("/{id}/permanent")
                    .route(web::delete().to(deletable::permanent_delete::<head_admins::Entity>)),
            ),
    );
}

#[derive(Debug, Deserialize, Validate)]
struct HeadAdminForm {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    name: String,
    #[validate(email(message = "A valid email address is required"))]
    email: String,
    position: Option<String>,
    phone: Option<String>,
    photo_path: Option<String>,
    is_active: Option<bool>,
}

async fn create_head_admin(
    client: ClientCtx,
    form: web::Json<HeadAdminForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let now = Utc::now().naive_utc();
    let form = form.into_inner();
    let head_admin = head_admins::ActiveModel {
        name: Set(form.name),
        email: Set(form.email),
        position: Set(form.position),
        phone: Set(form.phone),
        photo_path: Set(form.photo_path),
        is_active: Set(form.is_active.unwrap_or(true)),
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
        head_admins::Entity::RESOURCE,
        head_admin.id,
        Some(head_admin.name.clone()),
    );

    Ok(HttpResponse::Created().json(head_admin))
}

async fn update_head_admin(
    client: ClientCtx,
    path: web::Path<i32>,
    form: web::Json<HeadAdminForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;
    let id = path.into_inner();

    let model = lifecycle::require_active::<head_admins::Entity>(get_db_pool(), id).await?;

    let form = form.into_inner();
    let mut active: head_admins::ActiveModel = model.into();
    active.name = Set(form.name);
    active.email = Set(form.email);
    active.position = Set(form.position);
    active.phone = Set(form.phone);
    if let Some(photo_path) = form.photo_path {
        active.photo_path = Set(Some(photo_path));
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
        head_admins::Entity::RESOURCE,
        id,
        Some(updated.name.clone()),
    );

    Ok(HttpResponse::Ok().json(updated))
}
