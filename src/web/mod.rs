pub mod activity_logs;
pub mod announcements;
pub mod associate_groups;
pub mod deletable;
pub mod head_admins;
pub mod notifications;
pub mod reports;
pub mod system_alerts;
pub mod training_programs;

/// Configures the web app by adding services from each web file.
///
/// @see https://docs.rs/actix-web/4.0.1/actix_web/struct.App.html#method.configure
pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    // Route resolution stops at the first match.
    activity_logs::configure(conf);
    announcements::configure(conf);
    associate_groups::configure(conf);
    head_admins::configure(conf);
    notifications::configure(conf);
    reports::configure(conf);
    system_alerts::configure(conf);
    training_programs::configure(conf);
}
