use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method, StatusCode};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use poi_api::{build_router, AppState, NotificationBroker, Repositories};
use poi_infrastructure::{
    create_pool, run_migrations, PgAppUserRepository, PgNotificationRepository,
    PgOrganizationRepository, PgPoiAccessLogRepository, PgPoiPlatformStatRepository,
    PgPoiRepository, PgPoiReviewRepository,
};
use poi_shared::config::{AppConfig, DatabaseSettings, StorageBackend};
use poi_shared::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = telemetry::init_telemetry(&config.logging)?;

    info!("{} starting ({})", config.app.name, config.app.env);

    let repositories = build_repositories(&config.database).await?;
    let broker = Arc::new(NotificationBroker::new(config.notifications.channel_capacity));
    let state = AppState::new(repositories, broker, config.search.clone());

    let app = build_router(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.app.request_timeout_secs),
        ))
        .layer(cors_layer(config.app.cors_origin.as_deref())?)
        .layer(TraceLayer::new_for_http());

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn build_repositories(settings: &DatabaseSettings) -> anyhow::Result<Repositories> {
    match settings.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on shutdown");
            Ok(Repositories::in_memory())
        }
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&settings.url, settings.max_connections, settings.min_connections)
                .await
                .context("failed to connect to database")?;
            info!("Database connection established.");

            if settings.run_migrations {
                run_migrations(&pool).await.context("failed to run migrations")?;
            }

            Ok(Repositories {
                pois: Arc::new(PgPoiRepository::new(pool.clone())),
                organizations: Arc::new(PgOrganizationRepository::new(pool.clone())),
                users: Arc::new(PgAppUserRepository::new(pool.clone())),
                reviews: Arc::new(PgPoiReviewRepository::new(pool.clone())),
                access_logs: Arc::new(PgPoiAccessLogRepository::new(pool.clone())),
                platform_stats: Arc::new(PgPoiPlatformStatRepository::new(pool.clone())),
                notifications: Arc::new(PgNotificationRepository::new(pool)),
            })
        }
    }
}

fn cors_layer(origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let Some(origin) = origin else {
        return Ok(CorsLayer::permissive());
    };

    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("invalid CORS origin {}", origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
