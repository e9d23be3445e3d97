//! Tests for permanent deletion: only legal from the soft-deleted state,
//! erases the record, and purges its stored files.

mod common;
use serial_test::serial;

use common::{database::*, fixtures::*};
use handa::lifecycle::{self, LifecycleError};
use handa::orm::{announcements, reports};
use handa::storage::{local::LocalStorage, StorageBackend};
use sea_orm::EntityTrait;

async fn temp_storage() -> (tempfile::TempDir, LocalStorage) {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let storage = LocalStorage::new(dir.path().to_path_buf()).expect("Should create storage");
    (dir, storage)
}

#[actix_rt::test]
#[serial]
async fn test_permanent_delete_requires_soft_deleted_state() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");
    let (_dir, storage) = temp_storage().await;

    let created = create_test_announcement(&db, "Still active", vec![])
        .await
        .expect("Should create announcement");

    let result =
        lifecycle::permanent_delete::<announcements::Entity>(&db, &storage, created.id).await;
    assert!(
        matches!(result, Err(LifecycleError::InvalidState { .. })),
        "Permanent delete must be refused for active rows"
    );

    // The row is untouched
    let found = announcements::Entity::find_by_id(created.id)
        .one(&db)
        .await
        .expect("Query should succeed");
    assert!(found.is_some());
}

#[actix_rt::test]
#[serial]
async fn test_permanent_delete_erases_row_and_photos() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");
    let (_dir, storage) = temp_storage().await;

    storage
        .put_object(b"jpeg bytes".to_vec(), "announcements/a.jpg")
        .await
        .expect("Should store photo");
    storage
        .put_object(b"jpeg bytes".to_vec(), "announcements/b.jpg")
        .await
        .expect("Should store photo");

    let created = create_test_announcement(
        &db,
        "With photos",
        vec!["announcements/a.jpg", "announcements/b.jpg"],
    )
    .await
    .expect("Should create announcement");

    lifecycle::soft_delete::<announcements::Entity>(&db, created.id)
        .await
        .expect("Should soft delete");
    lifecycle::permanent_delete::<announcements::Entity>(&db, &storage, created.id)
        .await
        .expect("Should permanently delete");

    let found = announcements::Entity::find_by_id(created.id)
        .one(&db)
        .await
        .expect("Query should succeed");
    assert!(found.is_none(), "Row must be gone");

    assert!(!storage
        .exists("announcements/a.jpg")
        .await
        .expect("Should check"));
    assert!(!storage
        .exists("announcements/b.jpg")
        .await
        .expect("Should check"));
}

#[actix_rt::test]
#[serial]
async fn test_permanent_delete_purges_report_file_and_signature() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");
    let (_dir, storage) = temp_storage().await;

    storage
        .put_object(b"pdf bytes".to_vec(), "reports/q1.pdf")
        .await
        .expect("Should store file");
    storage
        .put_object(b"png bytes".to_vec(), "reports/q1-signature.png")
        .await
        .expect("Should store signature");

    let report = create_test_report(
        &db,
        "Q1 accomplishment",
        Some("reports/q1.pdf"),
        Some("reports/q1-signature.png"),
    )
    .await
    .expect("Should create report");

    lifecycle::soft_delete::<reports::Entity>(&db, report.id)
        .await
        .expect("Should soft delete");
    lifecycle::permanent_delete::<reports::Entity>(&db, &storage, report.id)
        .await
        .expect("Should permanently delete");

    assert!(!storage.exists("reports/q1.pdf").await.expect("Should check"));
    assert!(!storage
        .exists("reports/q1-signature.png")
        .await
        .expect("Should check"));
}

#[actix_rt::test]
#[serial]
async fn test_permanent_delete_tolerates_already_missing_files() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");
    let (_dir, storage) = temp_storage().await;

    // The referenced photo was never written to disk
    let created = create_test_announcement(&db, "Dangling path", vec!["announcements/ghost.jpg"])
        .await
        .expect("Should create announcement");

    lifecycle::soft_delete::<announcements::Entity>(&db, created.id)
        .await
        .expect("Should soft delete");

    lifecycle::permanent_delete::<announcements::Entity>(&db, &storage, created.id)
        .await
        .expect("A missing file is not a failure, the goal is absence");
}

#[actix_rt::test]
#[serial]
async fn test_permanent_delete_twice_is_not_found() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");
    let (_dir, storage) = temp_storage().await;

    let created = create_test_announcement(&db, "Once only", vec![])
        .await
        .expect("Should create announcement");

    lifecycle::soft_delete::<announcements::Entity>(&db, created.id)
        .await
        .expect("Should soft delete");
    lifecycle::permanent_delete::<announcements::Entity>(&db, &storage, created.id)
        .await
        .expect("Should permanently delete");

    let result =
        lifecycle::permanent_delete::<announcements::Entity>(&db, &storage, created.id).await;
    assert!(matches!(result, Err(LifecycleError::NotFound(_))));
}

#[actix_rt::test]
#[serial]
async fn test_restore_after_permanent_delete_is_not_found() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");
    let (_dir, storage) = temp_storage().await;

    let created = create_test_announcement(&db, "No way back", vec![])
        .await
        .expect("Should create announcement");

    lifecycle::soft_delete::<announcements::Entity>(&db, created.id)
        .await
        .expect("Should soft delete");
    lifecycle::permanent_delete::<announcements::Entity>(&db, &storage, created.id)
        .await
        .expect("Should permanently delete");

    let result = lifecycle::restore::<announcements::Entity>(&db, created.id).await;
    assert!(
        matches!(result, Err(LifecycleError::NotFound(_))),
        "Gone is terminal"
    );
}
