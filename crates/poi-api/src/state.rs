use std::sync::Arc;
use axum::extract::FromRef;

use poi_core::repositories::memory::{
    InMemoryAppUserRepository, InMemoryNotificationRepository, InMemoryOrganizationRepository,
    InMemoryPoiAccessLogRepository, InMemoryPoiPlatformStatRepository, InMemoryPoiRepository,
    InMemoryPoiReviewRepository,
};
use poi_core::repositories::{
    AppUserRepository, NotificationRepository, OrganizationRepository, PoiAccessLogRepository,
    PoiPlatformStatRepository, PoiRepository, PoiReviewRepository,
};
use poi_core::services::{
    AccessLogService, NotificationService, OrganizationService, PlatformStatService, PoiService,
    ReviewService, UserService,
};
use poi_shared::config::SearchSettings;

use crate::notifications::NotificationBroker;

/// The storage backend chosen at startup.
#[derive(Clone)]
pub struct Repositories {
    pub pois: Arc<dyn PoiRepository>,
    pub organizations: Arc<dyn OrganizationRepository>,
    pub users: Arc<dyn AppUserRepository>,
    pub reviews: Arc<dyn PoiReviewRepository>,
    pub access_logs: Arc<dyn PoiAccessLogRepository>,
    pub platform_stats: Arc<dyn PoiPlatformStatRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            pois: Arc::new(InMemoryPoiRepository::new()),
            organizations: Arc::new(InMemoryOrganizationRepository::new()),
            users: Arc::new(InMemoryAppUserRepository::new()),
            reviews: Arc::new(InMemoryPoiReviewRepository::new()),
            access_logs: Arc::new(InMemoryPoiAccessLogRepository::new()),
            platform_stats: Arc::new(InMemoryPoiPlatformStatRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub poi_service: Arc<PoiService>,
    pub organization_service: Arc<OrganizationService>,
    pub user_service: Arc<UserService>,
    pub review_service: Arc<ReviewService>,
    pub access_log_service: Arc<AccessLogService>,
    pub platform_stat_service: Arc<PlatformStatService>,
    pub notification_service: Arc<NotificationService>,
    pub broker: Arc<NotificationBroker>,
    pub search: SearchSettings,
}

impl AppState {
    pub fn new(repos: Repositories, broker: Arc<NotificationBroker>, search: SearchSettings) -> Self {
        Self {
            poi_service: Arc::new(PoiService::new(
                repos.pois.clone(),
                repos.organizations.clone(),
                repos.users.clone(),
            )),
            organization_service: Arc::new(OrganizationService::new(repos.organizations.clone())),
            user_service: Arc::new(UserService::new(repos.users.clone(), repos.organizations.clone())),
            review_service: Arc::new(ReviewService::new(
                repos.reviews.clone(),
                repos.pois.clone(),
                repos.users.clone(),
            )),
            access_log_service: Arc::new(AccessLogService::new(
                repos.access_logs.clone(),
                repos.pois.clone(),
            )),
            platform_stat_service: Arc::new(PlatformStatService::new(repos.platform_stats.clone())),
            notification_service: Arc::new(NotificationService::new(
                repos.notifications.clone(),
                broker.clone(),
            )),
            broker,
            search,
        }
    }
}

impl FromRef<AppState> for Arc<NotificationBroker> {
    fn from_ref(state: &AppState) -> Self {
        state.broker.clone()
    }
}
