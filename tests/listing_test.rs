//! Tests for paginated listings: the active and deleted views are
//! mutually exclusive, ordering is newest-first, and search narrows
//! within the selected view.

mod common;
use serial_test::serial;

use common::{database::*, fixtures::*};
use handa::lifecycle::{self, ListFilter};
use handa::orm::announcements;

#[actix_rt::test]
#[serial]
async fn test_default_listing_excludes_soft_deleted() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let keep = create_test_announcement(&db, "Stays visible", vec![])
        .await
        .expect("Should create announcement");
    let drop = create_test_announcement(&db, "Gets deleted", vec![])
        .await
        .expect("Should create announcement");

    lifecycle::soft_delete::<announcements::Entity>(&db, drop.id)
        .await
        .expect("Should soft delete");

    let active = lifecycle::list::<announcements::Entity>(&db, &ListFilter::default())
        .await
        .expect("Should list active view");
    assert_eq!(active.total, 1);
    assert_eq!(active.data[0].id, keep.id);

    let deleted = lifecycle::list::<announcements::Entity>(
        &db,
        &ListFilter {
            show_deleted: true,
            ..Default::default()
        },
    )
    .await
    .expect("Should list deleted view");
    assert_eq!(deleted.total, 1);
    assert_eq!(deleted.data[0].id, drop.id);
    assert!(deleted.data[0].deleted_at.is_some());
}

#[actix_rt::test]
#[serial]
async fn test_listing_orders_newest_first() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let first = create_test_announcement(&db, "Oldest", vec![])
        .await
        .expect("Should create announcement");
    let second = create_test_announcement(&db, "Middle", vec![])
        .await
        .expect("Should create announcement");
    let third = create_test_announcement(&db, "Newest", vec![])
        .await
        .expect("Should create announcement");

    let page = lifecycle::list::<announcements::Entity>(&db, &ListFilter::default())
        .await
        .expect("Should list");

    // Fixtures share a created_at down to sub-second precision, so the
    // id tie-breaker guarantees this order either way.
    let ids: Vec<i32> = page.data.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[actix_rt::test]
#[serial]
async fn test_listing_pagination() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    for n in 0..5 {
        create_test_announcement(&db, &format!("Announcement {}", n), vec![])
            .await
            .expect("Should create announcement");
    }

    let filter = ListFilter {
        page: Some(2),
        per_page: Some(2),
        ..Default::default()
    };
    let page = lifecycle::list::<announcements::Entity>(&db, &filter)
        .await
        .expect("Should list page 2");

    assert_eq!(page.total, 5);
    assert_eq!(page.per_page, 2);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.last_page, 3);
    assert_eq!(page.data.len(), 2);
}

#[actix_rt::test]
#[serial]
async fn test_empty_listing_reports_one_page() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    let page = lifecycle::list::<announcements::Entity>(&db, &ListFilter::default())
        .await
        .expect("Should list empty view");

    assert_eq!(page.total, 0);
    assert!(page.data.is_empty());
    // last_page stays 1 so console pagers always have a valid page
    assert_eq!(page.last_page, 1);
}

#[actix_rt::test]
#[serial]
async fn test_search_narrows_within_view() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    create_test_announcement(&db, "Typhoon preparedness", vec![])
        .await
        .expect("Should create announcement");
    create_test_announcement(&db, "Fire safety", vec![])
        .await
        .expect("Should create announcement");
    let deleted = create_test_announcement(&db, "Typhoon relief", vec![])
        .await
        .expect("Should create announcement");
    lifecycle::soft_delete::<announcements::Entity>(&db, deleted.id)
        .await
        .expect("Should soft delete");

    let filter = ListFilter {
        search: Some("Typhoon".to_string()),
        ..Default::default()
    };
    let page = lifecycle::list::<announcements::Entity>(&db, &filter)
        .await
        .expect("Should search active view");

    // Search applies within the active view only
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].title, "Typhoon preparedness");

    let filter = ListFilter {
        search: Some("Typhoon".to_string()),
        show_deleted: true,
        ..Default::default()
    };
    let page = lifecycle::list::<announcements::Entity>(&db, &filter)
        .await
        .expect("Should search deleted view");
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].id, deleted.id);
}

#[actix_rt::test]
#[serial]
async fn test_blank_search_term_is_ignored() {
    let db = setup_test_database()
        .await
        .expect("Failed to connect to test database");
    cleanup_test_data(&db).await.expect("Failed to cleanup");

    create_test_announcement(&db, "One", vec![])
        .await
        .expect("Should create announcement");
    create_test_announcement(&db, "Two", vec![])
        .await
        .expect("Should create announcement");

    let filter = ListFilter {
        search: Some("   ".to_string()),
        ..Default::default()
    };
    let page = lifecycle::list::<announcements::Entity>(&db, &filter)
        .await
        .expect("Should list");
    assert_eq!(page.total, 2);
}
