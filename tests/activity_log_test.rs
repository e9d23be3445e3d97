//! Tests for the admin activity log.

mod common;
use serial_test::serial;

use common::{database::*, fixtures::*};
use handa::orm::activity_logs;
use sea_orm::EntityTrait;

#[actix_rt::test]
#[serial]
async fn test_record_writes_one_row() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let admin = create_test_superadmin(&db, "activity_admin")
        .await
        .expect("Should create admin");

    let id = handa::activities::record(
        Some(admin.id),
        "soft_delete",
        "announcements",
        7,
        Some("Typhoon signal 3".to_string()),
    )
    .await
    .expect("Should record activity");

    let row = activity_logs::Entity::find_by_id(id)
        .one(&db)
        .await
        .expect("Query should succeed")
        .expect("Activity row should exist");
    assert_eq!(row.admin_id, Some(admin.id));
    assert_eq!(row.action, "soft_delete");
    assert_eq!(row.resource, "announcements");
    assert_eq!(row.resource_id, 7);
    assert_eq!(row.detail.as_deref(), Some("Typhoon signal 3"));
}

#[actix_rt::test]
#[serial]
async fn test_record_accepts_missing_admin() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    // System-originated actions carry no admin id
    let id = handa::activities::record(None, "send", "notifications", 3, None)
        .await
        .expect("Should record activity");

    let row = activity_logs::Entity::find_by_id(id)
        .one(&db)
        .await
        .expect("Query should succeed")
        .expect("Activity row should exist");
    assert_eq!(row.admin_id, None);
    assert_eq!(row.detail, None);
}

#[actix_rt::test]
#[serial]
async fn test_record_truncates_long_detail() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let long = "x".repeat(700);
    let id = handa::activities::record(None, "update", "reports", 1, Some(long))
        .await
        .expect("Should record activity");

    let row = activity_logs::Entity::find_by_id(id)
        .one(&db)
        .await
        .expect("Query should succeed")
        .expect("Activity row should exist");
    let detail = row.detail.expect("Detail should be stored");
    assert_eq!(detail.len(), 500);
    assert!(detail.ends_with("..."));
}

#[actix_rt::test]
#[serial]
async fn test_record_truncates_multibyte_detail() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    // A 255-char accented title is valid input but exceeds 500 bytes
    let long = "Pagsasanay sa paghahandå".repeat(25);
    let id = handa::activities::record(None, "update", "announcements", 1, Some(long))
        .await
        .expect("Should record activity with multibyte detail");

    let row = activity_logs::Entity::find_by_id(id)
        .one(&db)
        .await
        .expect("Query should succeed")
        .expect("Activity row should exist");
    let detail = row.detail.expect("Detail should be stored");
    assert!(detail.len() <= 500);
    assert!(detail.ends_with("..."));
}
