//! Training program management endpoints

use super::deletable;
use crate::activities;
use crate::db::get_db_pool;
use crate::lifecycle::{self, Deletable};
use crate::middleware::ClientCtx;
use crate::orm::training_programs;
use actix_web::{error, web, Error, HttpResponse};
use chrono::{NaiveDateTime, Utc};
use sea_orm::{entity::*, ActiveValue::Set};
use serde::Deserialize;
use validator::Validate;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(
        web::scope("/api/superadmin/training-programs")
            .service(
                web::resource("")
                    .route(web::get().to(deletable::list::<training_programs::Entity>))
                    .route(web::post().to(create_program)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(deletable::view::<training_programs::Entity>))
                    .route(web::put().to(update_program))
                    .route(web::delete().to(deletable::soft_delete::<training_programs::Entity>)),
            )
            .service(
                web::resource("/{id}/restore")
                    .route(web::post().to(deletable::restore::<training_programs::Entity>)),
            )
            .service(
                web::resource("/{id}/permanent").route(
                    web::delete().to(deletable::permanent_delete::<training_programs::Entity>),
                ),
            )
            .service(
                web::resource("/{id}/visibility").route(
                    web::put().to(deletable::toggle_visibility::<training_programs::Entity>),
                ),
            )
            .service(
                web::resource("/{id}/featured")
                    .route(web::put().to(deletable::toggle_featured::<training_programs::Entity>)),
            ),
    );
}

#[derive(Debug, Deserialize, Validate)]
struct TrainingProgramForm {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    description: String,
    venue: Option<String>,
    scheduled_at: Option<NaiveDateTime>,
    photo_path: Option<String>,
    visible_to_citizens: Option<bool>,
    featured: Option<bool>,
}

async fn create_program(
    client: ClientCtx,
    form: web::Json<TrainingProgramForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let now = Utc::now().naive_utc();
    let form = form.into_inner();
    let program = training_programs::ActiveModel {
        title: Set(form.title),
        description: Set(form.description),
        venue: Set(form.venue),
        scheduled_at: Set(form.scheduled_at),
        photo_path: Set(form.photo_path),
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
        training_programs::Entity::RESOURCE,
        program.id,
        Some(program.title.clone()),
    );

    Ok(HttpResponse::Created().json(program))
}

async fn update_program(
    client: ClientCtx,
    path: web::Path<i32>,
    form: web::Json<TrainingProgramForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = client.require_superadmin()?;
    form.validate().map_err(error::ErrorBadRequest)?;
    let id = path.into_inner();

    let model = lifecycle::require_active::<training_programs::Entity>(get_db_pool(), id).await?;

    let form = form.into_inner();
    let mut active: training_programs::ActiveModel = model.into();
    active.title = Set(form.title);
    active.description = Set(form.description);
    active.venue = Set(form.venue);
    active.scheduled_at = Set(form.scheduled_at);
    if let Some(photo_path) = form.photo_path {
        active.photo_path = Set(Some(photo_path));
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
        training_programs::Entity::RESOURCE,
        id,
        Some(updated.title.clone()),
    );

    Ok(HttpResponse::Ok().json(updated))
}
