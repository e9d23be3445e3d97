//! Associate group management endpoints

use super::deletable;
use crate::activities;
use crate::db::get_db_pool;
use crate::lifecycle::{self, Deletable};
use crate::middleware::ClientCtx;
use crate::orm::associate_groups;
use actix_web::{error, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::{entity::*, ActiveValue::Set};
use serde::Deserialize;
use validator::Validate;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(
        web::scope("/api/superadmin/associate-groups")
            .service(
                web::resource("")
                    .route(web::get().to(deletable::list::<associate_groups::Entity>))
                    .route(web::post().to(create_group)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(deletable::view::<associate_groups::Entity>))
                    .route(web::put().to(update_group))
                    .route(web::delete().to(deletable::soft_delete::<associate_groups::Entity>)),
            )
            .service(
                web::resource("/{id}/restore")
                    .route(web::post().to(deletable::restore::<associate_groups::Entity>)),
            )
            .service(
                web::resource("/{id}/permanent").route(
                    web::delete().to(deletable::permanent_delete::<associate_groups::Entity>),
                ),
            )
            .service(
                web::resource("/{id}/visibility").route(
                    web::put().to(deletable::toggle_visibility::<associate_groups::Entity>),
                ),
            ),
    );
}

#[derive(Debug, Deserialize, Validate)]
struct AssociateGroupForm {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    name: String,
    #[validate(length(min = 1, max = 255, message = "Director must be 1-255 characters"))]
    director: String,
    description: Option<String>,
    /// Stored logo path returned by the upload service
    logo_path: Option<String>,
    visible_to_citizens: Option<bool>,
}

async fn create_group(
    client: ClientCtx,
    form: web::Json<AssociateGroupForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let now = Utc::now().naive_utc();
    let form = form.into_inner();
    let group = associate_groups::ActiveModel {
        name: Set(form.name),
        director: Set(form.director),
        description: Set(form.description),
        logo_path: Set(form.logo_path),
        visible_to_citizens: Set(form.visible_to_citizens.unwrap_or(false)),
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
        associate_groups::Entity::RESOURCE,
        group.id,
        Some(group.name.clone()),
    );

    Ok(HttpResponse::Created().json(group))
}

async fn update_group(
    client: ClientCtx,
    path: web::Path<i32>,
    form: web::Json<AssociateGroupForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;
    let id = path.into_inner();

    let model = lifecycle::require_active::<associate_groups::Entity>(get_db_pool(), id).await?;

    let form = form.into_inner();
    let mut active: associate_groups::ActiveModel = model.into();
    active.name = Set(form.name);
    active.director = Set(form.director);
    active.description = Set(form.description);
    if let Some(logo_path) = form.logo_path {
        active.logo_path = Set(Some(logo_path));
    }
    if let Some(visible) = form.visible_to_citizens {
        active.visible_to_citizens = Set(visible);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active
        .update(get_db_pool())
        .await
        .map_err(error::ErrorInternalServerError)?;

    activities::record_detached(
        Some(admin_id),
        "update",
        associate_groups::Entity::RESOURCE,
        id,
        Some(updated.name.clone()),
    );

    Ok(HttpResponse::Ok().json(updated))
}
