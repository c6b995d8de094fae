// ============================================================================
// POI API - Router
// File: crates/poi-api/src/routes.rs
// ============================================================================

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{
    access_logs, health, notifications, organizations, platform_stats, pois, reviews, users, ws,
};
use crate::state::AppState;

/// Application routes. Transport layers (CORS, tracing, timeouts) are added
/// by the server binary.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ws/notifications", get(ws::notifications_socket))
        .nest("/api/v1", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(poi_routes())
        .merge(organization_routes())
        .merge(user_routes())
        .merge(review_routes())
        .merge(access_log_routes())
        .merge(platform_stat_routes())
        .merge(notification_routes())
}

fn poi_routes() -> Router<AppState> {
    Router::new()
        .route("/pois", get(pois::list_active_pois).post(pois::create_poi))
        .route("/pois/search", get(pois::search_pois))
        .route("/pois/nearby", get(pois::nearby_pois))
        .route("/pois/popular", get(pois::popular_pois))
        .route(
            "/pois/{id}",
            get(pois::get_poi)
                .patch(pois::update_poi)
                .delete(pois::delete_poi),
        )
        .route("/pois/{id}/popularity", put(pois::update_popularity))
        .route("/pois/{id}/activate", post(pois::activate_poi))
        .route("/pois/{id}/deactivate", post(pois::deactivate_poi))
        .route("/pois/{id}/reviews", get(reviews::list_poi_reviews))
        .route("/pois/{id}/reviews/stats", get(reviews::poi_review_stats))
        .route("/pois/{id}/reviews/average", get(reviews::poi_average_rating))
        .route("/pois/{id}/reviews/count", get(reviews::poi_review_count))
        .route("/pois/{id}/access-logs", get(access_logs::list_poi_access_logs))
        .route(
            "/pois/{id}/access-logs/recent",
            get(access_logs::list_recent_poi_access_logs),
        )
        .route("/pois/{id}/access-logs/count", get(access_logs::count_poi_access))
        .route(
            "/pois/{id}/organizations/{organization_id}/access-logs",
            get(access_logs::list_poi_organization_access_logs),
        )
        .route(
            "/pois/{id}/platform-stats",
            get(platform_stats::list_poi_stats).delete(platform_stats::delete_poi_stats),
        )
}

fn organization_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/organizations",
            get(organizations::list_organizations).post(organizations::create_organization),
        )
        .route(
            "/organizations/{id}",
            get(organizations::get_organization)
                .patch(organizations::update_organization)
                .delete(organizations::delete_organization),
        )
        .route("/organizations/{id}/pois", get(pois::list_organization_pois))
        .route(
            "/organizations/{id}/reviews",
            get(reviews::list_organization_reviews),
        )
        .route(
            "/organizations/{id}/access-logs",
            get(access_logs::list_organization_access_logs),
        )
        .route(
            "/organizations/{id}/access-logs/platforms",
            get(organizations::platform_breakdown),
        )
        .route(
            "/organizations/{id}/platform-stats",
            get(organizations::list_organization_stats)
                .delete(organizations::delete_organization_stats),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/by-username/{username}", get(users::get_user_by_username))
        .route("/users/by-email/{email}", get(users::get_user_by_email))
        .route(
            "/users/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/{id}/reviews", get(reviews::list_user_reviews))
        .route("/users/{id}/access-logs", get(access_logs::list_user_access_logs))
        .route(
            "/users/{id}/notifications",
            get(notifications::list_user_notifications),
        )
        .route(
            "/users/{id}/notifications/unread-count",
            get(notifications::unread_count),
        )
}

fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(reviews::create_review))
        .route(
            "/reviews/{id}",
            get(reviews::get_review)
                .patch(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .route("/reviews/{id}/like", post(reviews::like_review))
        .route("/reviews/{id}/dislike", post(reviews::dislike_review))
}

fn access_log_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/access-logs",
            get(access_logs::list_by_date_range)
                .post(access_logs::record_access)
                .delete(access_logs::purge_access_logs),
        )
        .route(
            "/access-logs/{id}",
            get(access_logs::get_access_log)
                .put(access_logs::update_access_log)
                .delete(access_logs::delete_access_log),
        )
        .route(
            "/access-logs/access-type/{access_type}",
            get(access_logs::list_by_access_type),
        )
        .route(
            "/access-logs/platform/{platform_type}",
            get(access_logs::list_by_platform),
        )
}

fn platform_stat_routes() -> Router<AppState> {
    Router::new()
        .route("/platform-stats", post(platform_stats::create_stat))
        .route("/platform-stats/count", get(platform_stats::count_stats))
        .route(
            "/platform-stats/platform/{platform_type}",
            get(platform_stats::list_platform_stats),
        )
        .route("/platform-stats/date/{date}", get(platform_stats::list_stats_on_date))
        .route(
            "/platform-stats/{id}",
            get(platform_stats::get_stat)
                .put(platform_stats::replace_stat)
                .delete(platform_stats::delete_stat),
        )
        .route("/platform-stats/{id}/exists", get(platform_stats::stat_exists))
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", post(notifications::send_notification))
        .route("/notifications/{id}", get(notifications::get_notification))
        .route(
            "/notifications/{id}/read",
            put(notifications::mark_notification_read),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use poi_core::domain::NewPointOfInterest;
    use poi_core::geo::GeoPoint;
    use poi_shared::config::SearchSettings;

    use crate::notifications::NotificationBroker;
    use crate::state::{AppState, Repositories};

    fn test_state() -> AppState {
        AppState::new(
            Repositories::in_memory(),
            Arc::new(NotificationBroker::new(16)),
            SearchSettings::default(),
        )
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    struct Seeded {
        org_id: Uuid,
        hilton_id: Uuid,
    }

    async fn seed_yaounde(state: &AppState) -> Seeded {
        let org = state
            .organization_service
            .create("Yaoundé Hospitality", Some("YH"), None)
            .await
            .unwrap();

        let located = |name: &str, lat: f64, lon: f64, score: f64| NewPointOfInterest {
            organization_id: org.id,
            name: name.to_string(),
            poi_type: "Hotel".to_string(),
            category: "Tourism".to_string(),
            location: Some(GeoPoint::new(lat, lon).unwrap()),
            popularity_score: Some(score),
            address: poi_core::domain::Address {
                city: Some("Yaoundé".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let hilton = state
            .poi_service
            .create(located("Hilton", 3.848, 11.502, 80.0))
            .await
            .unwrap();
        state
            .poi_service
            .create(located("Musée National", 3.866, 11.516, 40.0))
            .await
            .unwrap();

        Seeded {
            org_id: org.id,
            hilton_id: hilton.id,
        }
    }

    fn names(data: &Value) -> Vec<String> {
        data.as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = build_router(test_state());
        let (status, body) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_nearby_orders_by_distance() {
        let state = test_state();
        seed_yaounde(&state).await;
        let app = build_router(state);

        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/pois/nearby?latitude=3.848&longitude=11.502&radius_km=5",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["error"].is_null());
        assert_eq!(names(&body["data"]), vec!["Hilton", "Musée National"]);

        let first = body["data"][0]["distance_km"].as_f64().unwrap();
        let second = body["data"][1]["distance_km"].as_f64().unwrap();
        assert!(first < 0.01);
        assert!((second - 2.53).abs() < 0.1);
        assert_eq!(body["data"][0]["latitude"], 3.848);
        assert_eq!(body["data"][0]["city"], "Yaoundé");
    }

    #[tokio::test]
    async fn test_nearby_uses_default_radius() {
        let state = test_state();
        seed_yaounde(&state).await;
        let app = build_router(state);

        // Douala is about 200 km away, beyond the 10 km default
        let (status, body) =
            send(&app, "GET", "/api/v1/pois/nearby?latitude=4.05&longitude=9.7", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_nearby_missing_latitude_is_bad_request() {
        let app = build_router(test_state());
        let (status, body) = send(&app, "GET", "/api/v1/pois/nearby?longitude=11.5", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_nearby_rejects_invalid_coordinates() {
        let app = build_router(test_state());

        let (status, body) =
            send(&app, "GET", "/api/v1/pois/nearby?latitude=95&longitude=11.5", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            "GET",
            "/api/v1/pois/nearby?latitude=3.8&longitude=11.5&radius_km=0",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_filters_case_insensitive_city() {
        let state = test_state();
        let seeded = seed_yaounde(&state).await;
        let app = build_router(state);

        let uri = format!(
            "/api/v1/pois/search?organization_id={}&city=YAOUND%C3%89",
            seeded.org_id
        );
        let (status, body) = send(&app, "GET", &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body["data"]), vec!["Hilton", "Musée National"]);

        let (_, body) = send(&app, "GET", "/api/v1/pois/search?search_term=mus", None).await;
        assert_eq!(names(&body["data"]), vec!["Musée National"]);
    }

    #[tokio::test]
    async fn test_search_page_zero_is_rejected() {
        let app = build_router(test_state());
        let (status, body) = send(&app, "GET", "/api/v1/pois/search?page=0", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_popular_respects_limit() {
        let state = test_state();
        seed_yaounde(&state).await;
        let app = build_router(state);

        let (_, body) = send(&app, "GET", "/api/v1/pois/popular?limit=1", None).await;
        assert_eq!(names(&body["data"]), vec!["Hilton"]);

        let (status, body) = send(&app, "GET", "/api/v1/pois/popular?limit=0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());

        let (_, body) = send(&app, "GET", "/api/v1/pois/popular", None).await;
        assert_eq!(names(&body["data"]), vec!["Hilton", "Musée National"]);
    }

    #[tokio::test]
    async fn test_update_popularity_score() {
        let state = test_state();
        let seeded = seed_yaounde(&state).await;
        let app = build_router(state.clone());
        let uri = format!("/api/v1/pois/{}/popularity", seeded.hilton_id);

        let (status, body) = send(&app, "PUT", &uri, Some(json!({ "score": 150.0 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let unchanged = state.poi_service.get(&seeded.hilton_id).await.unwrap();
        assert_eq!(unchanged.popularity_score, 80.0);

        let (status, body) = send(&app, "PUT", &uri, Some(json!({ "score": 55.5 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["popularity_score"], 55.5);

        let missing = format!("/api/v1/pois/{}/popularity", Uuid::new_v4());
        let (status, body) = send(&app, "PUT", &missing, Some(json!({ "score": 50.0 }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_poi_requires_both_coordinates() {
        let state = test_state();
        let seeded = seed_yaounde(&state).await;
        let app = build_router(state);

        let body = json!({
            "organization_id": seeded.org_id,
            "name": "Lone Latitude",
            "poi_type": "Cafe",
            "category": "Food",
            "latitude": 3.85
        });
        let (status, body) = send(&app, "POST", "/api/v1/pois", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_then_delete_poi() {
        let state = test_state();
        let seeded = seed_yaounde(&state).await;
        let app = build_router(state);

        let body = json!({
            "organization_id": seeded.org_id,
            "name": "Café Bastos",
            "poi_type": "Cafe",
            "category": "Food",
            "latitude": 3.8667,
            "longitude": 11.5167,
            "city": "Yaoundé",
            "amenities": ["wifi"]
        });
        let (status, body) = send(&app, "POST", "/api/v1/pois", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["amenities"], json!(["wifi"]));
        assert_eq!(body["data"]["popularity_score"], 0.0);

        let id = body["data"]["id"].as_str().unwrap().to_string();
        let (status, _) = send(&app, "DELETE", &format!("/api/v1/pois/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &format!("/api/v1/pois/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_organization_code_conflicts() {
        let app = build_router(test_state());
        let body = json!({ "name": "Yow Point", "code": "YOW" });

        let (status, _) = send(&app, "POST", "/api/v1/organizations", Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "POST", "/api/v1/organizations", Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = build_router(test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/organizations")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_notification_delivered_to_connected_user() {
        let state = test_state();
        let app = build_router(state.clone());
        let user_id = Uuid::new_v4();
        let mut subscription = state.broker.subscribe(user_id);

        let body = json!({
            "recipient_id": user_id,
            "title": "New review",
            "content": "Someone reviewed your POI",
            "kind": "REVIEW_POSTED"
        });
        let (status, body) = send(&app, "POST", "/api/v1/notifications", Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["sent"], true);
        assert_eq!(body["data"]["channel"], "WEB_SOCKET");

        let payload = subscription.receiver.try_recv().unwrap();
        assert_eq!(payload.recipient_id, user_id);
        assert_eq!(payload.title, "New review");
    }

    #[tokio::test]
    async fn test_mark_read_by_other_user_is_forbidden() {
        let state = test_state();
        let app = build_router(state);
        let recipient = Uuid::new_v4();

        let body = json!({ "recipient_id": recipient, "title": "Hi", "content": "Hello" });
        let (_, created) = send(&app, "POST", "/api/v1/notifications", Some(body)).await;
        assert_eq!(created["data"]["sent"], false);
        let id = created["data"]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/v1/notifications/{}/read", id);

        let (status, body) = send(&app, "PUT", &uri, Some(json!({ "user_id": Uuid::new_v4() }))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");

        let (status, body) = send(&app, "PUT", &uri, Some(json!({ "user_id": recipient }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["read_at"].is_string());

        let unread = format!("/api/v1/users/{}/notifications/unread-count", recipient);
        let (_, body) = send(&app, "GET", &unread, None).await;
        assert_eq!(body["data"]["count"], 0);
    }

    #[tokio::test]
    async fn test_access_log_update_and_lookups() {
        let state = test_state();
        let seeded = seed_yaounde(&state).await;
        let app = build_router(state);

        let record = json!({
            "poi_id": seeded.hilton_id,
            "platform_type": "android",
            "access_type": "view"
        });
        let (status, body) = send(&app, "POST", "/api/v1/access-logs", Some(record)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let uri = format!("/api/v1/access-logs/{}", id);
        let changes = json!({ "platform_type": "ios", "access_type": "Click" });
        let (status, body) = send(&app, "PUT", &uri, Some(changes)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["platform_type"], "IOS");
        assert_eq!(body["data"]["access_type"], "click");

        let (_, body) = send(&app, "GET", "/api/v1/access-logs/access-type/click", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        let (_, body) = send(&app, "GET", "/api/v1/access-logs/platform/android", None).await;
        assert!(body["data"].as_array().unwrap().is_empty());

        let scoped = format!(
            "/api/v1/pois/{}/organizations/{}/access-logs",
            seeded.hilton_id, seeded.org_id
        );
        let (status, body) = send(&app, "GET", &scoped, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["id"], id);

        let missing = format!("/api/v1/access-logs/{}", Uuid::new_v4());
        let (status, body) = send(&app, "PUT", &missing, Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_platform_stat_lookups_and_exists() {
        let state = test_state();
        let seeded = seed_yaounde(&state).await;
        let app = build_router(state);

        let stat = json!({
            "organization_id": seeded.org_id,
            "platform_type": "web",
            "stat_date": "2024-05-01",
            "views": 12
        });
        let (status, body) = send(&app, "POST", "/api/v1/platform-stats", Some(stat)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (_, body) = send(&app, "GET", "/api/v1/platform-stats/platform/WEB", None).await;
        assert_eq!(body["data"][0]["id"], id);
        let (_, body) = send(&app, "GET", "/api/v1/platform-stats/date/2024-05-01", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        let (_, body) = send(&app, "GET", "/api/v1/platform-stats/date/2024-05-02", None).await;
        assert!(body["data"].as_array().unwrap().is_empty());

        let exists = format!("/api/v1/platform-stats/{}/exists", id);
        let (status, body) = send(&app, "GET", &exists, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["exists"], true);

        let absent = format!("/api/v1/platform-stats/{}/exists", Uuid::new_v4());
        let (status, body) = send(&app, "GET", &absent, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["exists"], false);
    }

    #[tokio::test]
    async fn test_socket_requires_upgrade() {
        let app = build_router(test_state());
        let request = Request::builder()
            .uri(format!("/ws/notifications?user_id={}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }
}
