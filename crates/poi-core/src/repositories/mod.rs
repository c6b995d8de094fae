//! Repository traits (ports) and their in-memory implementations

pub mod poi_repository;
pub mod organization_repository;
pub mod app_user_repository;
pub mod poi_review_repository;
pub mod poi_access_log_repository;
pub mod poi_platform_stat_repository;
pub mod notification_repository;
pub mod memory;

pub use poi_repository::PoiRepository;
pub use organization_repository::OrganizationRepository;
pub use app_user_repository::AppUserRepository;
pub use poi_review_repository::PoiReviewRepository;
pub use poi_access_log_repository::PoiAccessLogRepository;
pub use poi_platform_stat_repository::PoiPlatformStatRepository;
pub use notification_repository::NotificationRepository;

#[cfg(test)]
pub use poi_repository::MockPoiRepository;
#[cfg(test)]
pub use organization_repository::MockOrganizationRepository;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
