//! # POI Core - Domain Module
//! 
//! Domain entities for the Yow Point backend.

pub mod organization;
pub mod app_user;
pub mod point_of_interest;
pub mod poi_review;
pub mod poi_access_log;
pub mod poi_platform_stat;
pub mod notification;

// Re-export all entities and enums
pub use organization::{Organization, OrganizationChanges};
pub use app_user::{AppUser, AppUserChanges, UserRole};
pub use point_of_interest::{
    validate_popularity_score, Address, ContactPerson, NewPointOfInterest, PoiChanges,
    PointOfInterest,
};
pub use poi_review::{PoiReview, ReviewChanges, ReviewStats};
pub use poi_access_log::{AccessLogChanges, PlatformCount, PoiAccessLog};
pub use poi_platform_stat::{NewPlatformStat, PoiPlatformStat};
pub use notification::{Notification, NotificationChannel, NotificationKind, NotificationPayload};
