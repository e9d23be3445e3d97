use actix_web::http::header;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use env_logger::Env;
use handa::db::{get_db_pool, init_db};
use handa::middleware::ClientCtx;
use handa::storage::{local::LocalStorage, StorageBackend};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_lib_mods();
    init_our_mods();
    init_db(std::env::var("DATABASE_URL").expect("DATABASE_URL must be set.")).await;

    // First deployment: create a superadmin and log its token once.
    handa::auth::bootstrap_superadmin(get_db_pool()).await?;

    let storage_config = handa::app_config::storage();
    if storage_config.backend != "local" {
        log::warn!(
            "Unknown storage backend '{}', falling back to local",
            storage_config.backend
        );
    }
    let storage: Arc<dyn StorageBackend> =
        Arc::new(LocalStorage::new(PathBuf::from(storage_config.local_path))?);

    // Sweep expired bearer tokens in the background
    actix_web::rt::spawn(async {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(3600));
        loop {
            interval.tick().await;
            match handa::auth::expire_tokens(get_db_pool()).await {
                Ok(0) => {}
                Ok(n) => log::info!("Expired {} bearer token(s)", n),
                Err(e) => log::warn!("Token expiry sweep failed: {}", e),
            }
        }
    });

    let bind = handa::app_config::site().bind;
    log::info!("Listening on {}", bind);

    HttpServer::new(move || {
        // Order of middleware IS IMPORTANT and is in REVERSE EXECUTION ORDER.
        App::new()
            .app_data(Data::new(storage.clone()))
            // Security headers - applied to all responses
            .wrap(
                DefaultHeaders::new()
                    .add((header::X_FRAME_OPTIONS, "DENY"))
                    .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
                    .add(("Referrer-Policy", "strict-origin-when-cross-origin")),
            )
            .wrap(ClientCtx::default())
            .wrap(Logger::new("%a %{User-Agent}i"))
            .configure(handa::web::configure)
    })
    .bind(&bind)?
    .run()
    .await?;

    Ok(())
}

/// Initialize third party crates we rely on but don't have control over.
pub fn init_lib_mods() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

/// Initialize all local mods.
pub fn init_our_mods() {
    handa::app_config::init();
}
