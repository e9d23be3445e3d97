//! Activity log for tracking admin actions
//!
//! Every lifecycle transition writes one row. Recording is fire-and-forget
//! from the request path: a failed write is logged, never surfaced.

use crate::db::get_db_pool;
use crate::orm::activity_logs;
use chrono::Utc;
use sea_orm::{entity::*, ActiveValue::Set, DbErr};

// =============================================================================
// Activity Recording Functions
// =============================================================================

/// Record an admin action against a resource.
pub async fn record(
    admin_id: Option<i32>,
    action: &str,
    resource: &str,
    resource_id: i32,
    detail: Option<String>,
) -> Result<i32, DbErr> {
    let db = get_db_pool();

    let detail = detail.map(truncate_detail);

    let entry = activity_logs::ActiveModel {
        admin_id: Set(admin_id),
        action: Set(action.to_string()),
        resource: Set(resource.to_string()),
        resource_id: Set(resource_id),
        detail: Set(detail),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    let result = entry.insert(db).await?;
    Ok(result.id)
}

/// Cap detail at 500 bytes. The cut must land on a char boundary;
/// titles routinely carry accented characters.
fn truncate_detail(detail: String) -> String {
    if detail.len() <= 500 {
        return detail;
    }
    let cut = detail
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= 497)
        .last()
        .unwrap_or(0);
    format!("{}...", &detail[..cut])
}

/// Record an admin action without blocking the request.
pub fn record_detached(
    admin_id: Option<i32>,
    action: &'static str,
    resource: &'static str,
    resource_id: i32,
    detail: Option<String>,
) {
    actix_web::rt::spawn(async move {
        if let Err(e) = record(admin_id, action, resource, resource_id, detail).await {
            log::warn!(
                "Failed to record activity {} on {} #{}: {}",
                action,
                resource,
                resource_id,
                e
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_detail_is_unchanged() {
        assert_eq!(truncate_detail("soft_delete".to_string()), "soft_delete");
    }

    #[test]
    fn test_long_detail_is_capped() {
        let capped = truncate_detail("x".repeat(700));
        assert_eq!(capped.len(), 500);
        assert!(capped.ends_with("..."));
    }

    #[test]
    fn test_multibyte_detail_is_cut_on_char_boundary() {
        // 255 accented chars pass the title validators but span 510 bytes
        let capped = truncate_detail("ñ".repeat(255));
        assert!(capped.len() <= 500);
        assert!(capped.ends_with("..."));
        assert!(capped.trim_end_matches("...").chars().all(|c| c == 'ñ'));
    }
}
