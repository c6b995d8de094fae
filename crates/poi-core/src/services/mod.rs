//! Domain services (business logic)

pub mod poi_service;
pub mod organization_service;
pub mod user_service;
pub mod review_service;
pub mod access_log_service;
pub mod platform_stat_service;
pub mod notification_service;

pub use poi_service::PoiService;
pub use organization_service::OrganizationService;
pub use user_service::{NewAppUser, UserService};
pub use review_service::{NewReview, ReviewService};
pub use access_log_service::{AccessLogService, NewAccessLog};
pub use platform_stat_service::PlatformStatService;
pub use notification_service::{NewNotification, NotificationPublisher, NotificationService};
