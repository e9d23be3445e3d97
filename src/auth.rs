//! Bearer token issue and verification.
//!
//! Session and password handling belong to the main auth service; this
//! module is only the seam the superadmin API needs: opaque tokens whose
//! blake3 digest is matched against the admin_tokens table.

use crate::orm::{admin_tokens, admins};
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use sea_orm::{entity::*, query::*, ActiveValue::Set, DatabaseConnection, DbErr, PaginatorTrait};

/// Length of generated bearer tokens in characters.
const TOKEN_LENGTH: usize = 48;

/// Hex blake3 digest of a bearer token, as stored in admin_tokens.
pub fn hash_token(token: &str) -> String {
    blake3::hash(token.as_bytes()).to_hex().to_string()
}

/// Generate a fresh random token string.
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Issue a new token for an admin. Returns the cleartext token, which is
/// never stored and cannot be recovered later.
pub async fn issue_token(db: &DatabaseConnection, admin_id: i32) -> Result<String, DbErr> {
    let token = generate_token();
    let now = Utc::now().naive_utc();
    let lifetime = Duration::hours(crate::app_config::auth().token_lifetime_hours as i64);

    admin_tokens::ActiveModel {
        admin_id: Set(admin_id),
        token_hash: Set(hash_token(&token)),
        created_at: Set(now),
        expires_at: Set(now + lifetime),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(token)
}

/// Resolve a bearer token to the admin account it belongs to.
/// Returns None for unknown or expired tokens.
pub async fn authenticate_token(
    db: &DatabaseConnection,
    token: &str,
) -> Result<Option<admins::Model>, DbErr> {
    let record = admin_tokens::Entity::find()
        .filter(admin_tokens::Column::TokenHash.eq(hash_token(token)))
        .one(db)
        .await?;

    let record = match record {
        Some(record) => record,
        None => return Ok(None),
    };

    if record.expires_at < Utc::now().naive_utc() {
        return Ok(None);
    }

    admins::Entity::find_by_id(record.admin_id).one(db).await
}

/// Delete expired tokens. Called periodically from the server loop.
pub async fn expire_tokens(db: &DatabaseConnection) -> Result<u64, DbErr> {
    let result = admin_tokens::Entity::delete_many()
        .filter(admin_tokens::Column::ExpiresAt.lt(Utc::now().naive_utc()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Create the first superadmin account with a fresh token when the admins
/// table is empty. The token is logged once so the operator can reach the
/// console on a new deployment.
pub async fn bootstrap_superadmin(db: &DatabaseConnection) -> Result<(), DbErr> {
    let count = admins::Entity::find().count(db).await?;
    if count > 0 {
        return Ok(());
    }

    let admin = admins::ActiveModel {
        name: Set("Superadmin".to_string()),
        email: Set("superadmin@localhost".to_string()),
        role: Set(admins::AdminRole::SuperAdmin),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let token = issue_token(db, admin.id).await?;
    log::warn!(
        "No admin accounts found. Created initial superadmin (id {}) with bearer token:\r\n{}\r\nThis token is shown once. Issue a replacement and rotate it.",
        admin.id,
        token
    );

    Ok(())
}
