//! # POI Infrastructure
//! 
//! PostgreSQL implementations of the repository ports.

pub mod database;

pub use database::{
    create_pool, run_migrations, PgAppUserRepository, PgNotificationRepository,
    PgOrganizationRepository, PgPoiAccessLogRepository, PgPoiPlatformStatRepository,
    PgPoiRepository, PgPoiReviewRepository,
};
