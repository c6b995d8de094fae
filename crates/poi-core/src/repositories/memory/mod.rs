//! In-memory repositories backed by `parking_lot::RwLock<HashMap<..>>`.
//!
//! Used by `database.backend = "memory"` and by tests throughout the
//! workspace. Query semantics come from [`crate::search`] so both storage
//! backends rank results the same way.

mod poi;
mod organization;
mod app_user;
mod poi_review;
mod poi_access_log;
mod poi_platform_stat;
mod notification;

pub use poi::InMemoryPoiRepository;
pub use organization::InMemoryOrganizationRepository;
pub use app_user::InMemoryAppUserRepository;
pub use poi_review::InMemoryPoiReviewRepository;
pub use poi_access_log::InMemoryPoiAccessLogRepository;
pub use poi_platform_stat::InMemoryPoiPlatformStatRepository;
pub use notification::InMemoryNotificationRepository;
