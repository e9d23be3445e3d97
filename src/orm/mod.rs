//! SeaORM entity definitions.

pub mod activity_logs;
pub mod admin_tokens;
pub mod admins;
pub mod announcements;
pub mod associate_groups;
pub mod head_admins;
pub mod notifications;
pub mod reports;
pub mod system_alerts;
pub mod training_programs;
