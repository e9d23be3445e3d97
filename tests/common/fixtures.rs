//! Test fixtures for creating test data
#![allow(dead_code)]

use chrono::Utc;
use sea_orm::{entity::*, ActiveValue::Set, DatabaseConnection, DbErr};

/// Create a superadmin account for tests that record activity
pub async fn create_test_superadmin(
    db: &DatabaseConnection,
    name: &str,
) -> Result<handa::orm::admins::Model, DbErr> {
    use handa::orm::admins;

    admins::ActiveModel {
        name: Set(name.to_string()),
        email: Set(format!("{}@test.invalid", name)),
        role: Set(admins::AdminRole::SuperAdmin),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Create an announcement, optionally with stored photo paths
pub async fn create_test_announcement(
    db: &DatabaseConnection,
    title: &str,
    photos: Vec<&str>,
) -> Result<handa::orm::announcements::Model, DbErr> {
    use handa::orm::announcements;

    let now = Utc::now().naive_utc();
    announcements::ActiveModel {
        title: Set(title.to_string()),
        content: Set(format!("Body for {}", title)),
        photos: Set(serde_json::json!(photos)),
        visible_to_citizens: Set(true),
        featured: Set(false),
        created_by: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Create a training program
pub async fn create_test_training_program(
    db: &DatabaseConnection,
    title: &str,
    photo_path: Option<&str>,
) -> Result<handa::orm::training_programs::Model, DbErr> {
    use handa::orm::training_programs;

    let now = Utc::now().naive_utc();
    training_programs::ActiveModel {
        title: Set(title.to_string()),
        description: Set(format!("Description for {}", title)),
        venue: Set(Some("Evacuation Center A".to_string())),
        scheduled_at: Set(None),
        photo_path: Set(photo_path.map(String::from)),
        visible_to_citizens: Set(true),
        featured: Set(false),
        created_by: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Create a report with both stored files set
pub async fn create_test_report(
    db: &DatabaseConnection,
    title: &str,
    file_path: Option<&str>,
    signature_path: Option<&str>,
) -> Result<handa::orm::reports::Model, DbErr> {
    use handa::orm::reports;

    let now = Utc::now().naive_utc();
    reports::ActiveModel {
        title: Set(title.to_string()),
        category: Set("quarterly".to_string()),
        period: Set(Some("2026-Q1".to_string())),
        file_path: Set(file_path.map(String::from)),
        signature_path: Set(signature_path.map(String::from)),
        created_by: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Create a draft notification
pub async fn create_test_notification(
    db: &DatabaseConnection,
    title: &str,
) -> Result<handa::orm::notifications::Model, DbErr> {
    use handa::orm::notifications;

    let now = Utc::now().naive_utc();
    notifications::ActiveModel {
        title: Set(title.to_string()),
        message: Set(format!("Message for {}", title)),
        recipients: Set(serde_json::json!(["all"])),
        status: Set(notifications::NotificationStatus::Draft),
        sent_at: Set(None),
        created_by: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
