//! PostgreSQL repository implementations

pub mod poi_repo_impl;
pub mod organization_repo_impl;
pub mod app_user_repo_impl;
pub mod review_repo_impl;
pub mod access_log_repo_impl;
pub mod platform_stat_repo_impl;
pub mod notification_repo_impl;

pub use poi_repo_impl::PgPoiRepository;
pub use organization_repo_impl::PgOrganizationRepository;
pub use app_user_repo_impl::PgAppUserRepository;
pub use review_repo_impl::PgPoiReviewRepository;
pub use access_log_repo_impl::PgPoiAccessLogRepository;
pub use platform_stat_repo_impl::PgPoiPlatformStatRepository;
pub use notification_repo_impl::PgNotificationRepository;

use poi_core::error::DomainError;
use tracing::error;

/// Logs a failed statement and converts it into a `DomainError::DatabaseError`.
pub(crate) fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", action, e);
        DomainError::DatabaseError(e.to_string())
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    let msg = e.to_string();
    msg.contains("unique") || msg.contains("duplicate")
}
