//! POI access logging and usage queries

use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use tracing::{debug, info};
use uuid::Uuid;

use poi_shared::Pagination;

use crate::domain::{AccessLogChanges, PlatformCount, PoiAccessLog};
use crate::error::DomainError;
use crate::repositories::{PoiAccessLogRepository, PoiRepository};
use crate::search::validate_pagination;

#[derive(Debug, Clone)]
pub struct NewAccessLog {
    pub poi_id: Uuid,
    pub platform_type: String,
    pub user_id: Option<Uuid>,
    pub access_type: Option<String>,
    pub accessed_at: Option<DateTime<Utc>>,
    pub metadata: Option<JsonValue>,
}

pub struct AccessLogService {
    log_repo: Arc<dyn PoiAccessLogRepository>,
    poi_repo: Arc<dyn PoiRepository>,
}

fn validate_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), DomainError> {
    if start > end {
        return Err(DomainError::ValidationError(
            "start date must not be after end date".to_string(),
        ));
    }
    Ok(())
}

impl AccessLogService {
    pub fn new(log_repo: Arc<dyn PoiAccessLogRepository>, poi_repo: Arc<dyn PoiRepository>) -> Self {
        Self { log_repo, poi_repo }
    }

    pub async fn create(&self, input: NewAccessLog) -> Result<PoiAccessLog, DomainError> {
        let poi = self
            .poi_repo
            .find_by_id(&input.poi_id)
            .await?
            .ok_or(DomainError::PoiNotFound(input.poi_id))?;

        let log = PoiAccessLog::new(
            poi.id,
            poi.organization_id,
            input.platform_type,
            input.user_id,
            input.access_type,
            input.accessed_at,
            input.metadata,
        )?;
        let created = self.log_repo.create(&log).await?;

        debug!("Access logged for POI {} from {}", poi.id, created.platform_type);
        Ok(created)
    }

    pub async fn get(&self, id: &Uuid) -> Result<PoiAccessLog, DomainError> {
        self.log_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AccessLogNotFound(*id))
    }

    pub async fn list_by_poi(
        &self,
        poi_id: &Uuid,
        pagination: Option<Pagination>,
    ) -> Result<Vec<PoiAccessLog>, DomainError> {
        validate_pagination(pagination)?;
        self.log_repo.find_by_poi(poi_id, pagination).await
    }

    pub async fn list_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PoiAccessLog>, DomainError> {
        self.log_repo.find_by_organization(organization_id).await
    }

    pub async fn list_by_user(&self, user_id: &Uuid) -> Result<Vec<PoiAccessLog>, DomainError> {
        self.log_repo.find_by_user(user_id).await
    }

    pub async fn list_by_access_type(&self, access_type: &str) -> Result<Vec<PoiAccessLog>, DomainError> {
        self.log_repo
            .find_by_access_type(&access_type.trim().to_lowercase())
            .await
    }

    pub async fn list_by_platform(&self, platform_type: &str) -> Result<Vec<PoiAccessLog>, DomainError> {
        self.log_repo
            .find_by_platform(&platform_type.trim().to_uppercase())
            .await
    }

    pub async fn list_by_poi_and_organization(
        &self,
        poi_id: &Uuid,
        organization_id: &Uuid,
    ) -> Result<Vec<PoiAccessLog>, DomainError> {
        self.log_repo
            .find_by_poi_and_organization(poi_id, organization_id)
            .await
    }

    pub async fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PoiAccessLog>, DomainError> {
        validate_range(start, end)?;
        self.log_repo.find_by_date_range(start, end).await
    }

    pub async fn list_recent_by_poi(
        &self,
        poi_id: &Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<PoiAccessLog>, DomainError> {
        self.log_repo.find_recent_by_poi(poi_id, since).await
    }

    pub async fn count_by_poi(&self, poi_id: &Uuid) -> Result<i64, DomainError> {
        self.log_repo.count_by_poi(poi_id).await
    }

    pub async fn count_by_poi_and_access_type(
        &self,
        poi_id: &Uuid,
        access_type: &str,
    ) -> Result<i64, DomainError> {
        self.log_repo
            .count_by_poi_and_access_type(poi_id, &access_type.trim().to_lowercase())
            .await
    }

    pub async fn platform_breakdown(&self, organization_id: &Uuid) -> Result<Vec<PlatformCount>, DomainError> {
        self.log_repo.platform_counts_by_organization(organization_id).await
    }

    /// Rewrites the provided fields. Moving a log to another POI also moves
    /// it to that POI's organization.
    pub async fn update(&self, id: &Uuid, changes: AccessLogChanges) -> Result<PoiAccessLog, DomainError> {
        let mut log = self.get(id).await?;

        if let Some(poi_id) = changes.poi_id {
            let poi = self
                .poi_repo
                .find_by_id(&poi_id)
                .await?
                .ok_or(DomainError::PoiNotFound(poi_id))?;
            log.poi_id = poi.id;
            log.organization_id = poi.organization_id;
        }
        log.apply_changes(changes)?;

        let updated = self.log_repo.update(&log).await?;
        info!("Access log updated: {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        if !self.log_repo.delete(id).await? {
            return Err(DomainError::AccessLogNotFound(*id));
        }
        Ok(())
    }

    pub async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let removed = self.log_repo.delete_older_than(cutoff).await?;
        info!("Purged {} access logs older than {}", removed, cutoff);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewPointOfInterest, PointOfInterest};
    use crate::repositories::memory::{InMemoryPoiAccessLogRepository, InMemoryPoiRepository};
    use chrono::Duration;

    async fn setup() -> (AccessLogService, PointOfInterest) {
        let pois = Arc::new(InMemoryPoiRepository::new());
        let poi = PointOfInterest::new(NewPointOfInterest {
            organization_id: Uuid::new_v4(),
            name: "Musée National".to_string(),
            poi_type: "MUSEUM".to_string(),
            category: "Culture".to_string(),
            ..Default::default()
        })
        .unwrap();
        pois.create(&poi).await.unwrap();
        (
            AccessLogService::new(Arc::new(InMemoryPoiAccessLogRepository::new()), pois),
            poi,
        )
    }

    fn access(poi: &PointOfInterest, platform: &str, kind: &str, at: Option<DateTime<Utc>>) -> NewAccessLog {
        NewAccessLog {
            poi_id: poi.id,
            platform_type: platform.to_string(),
            user_id: None,
            access_type: Some(kind.to_string()),
            accessed_at: at,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_counts_and_platform_breakdown() {
        let (service, poi) = setup().await;
        service.create(access(&poi, "android", "view", None)).await.unwrap();
        service.create(access(&poi, "ANDROID", "click", None)).await.unwrap();
        service.create(access(&poi, "ios", "view", None)).await.unwrap();

        assert_eq!(service.count_by_poi(&poi.id).await.unwrap(), 3);
        assert_eq!(service.count_by_poi_and_access_type(&poi.id, "VIEW").await.unwrap(), 2);

        let breakdown = service.platform_breakdown(&poi.organization_id).await.unwrap();
        assert_eq!(
            breakdown,
            vec![
                PlatformCount { platform_type: "ANDROID".to_string(), count: 2 },
                PlatformCount { platform_type: "IOS".to_string(), count: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_date_range_and_purge() {
        let (service, poi) = setup().await;
        let now = Utc::now();
        service
            .create(access(&poi, "WEB", "view", Some(now - Duration::days(40))))
            .await
            .unwrap();
        service.create(access(&poi, "WEB", "view", Some(now))).await.unwrap();

        assert!(service.list_by_date_range(now, now - Duration::days(1)).await.is_err());
        let recent = service
            .list_by_date_range(now - Duration::days(1), now + Duration::seconds(1))
            .await
            .unwrap();
        assert_eq!(recent.len(), 1);

        let removed = service.purge_older_than(now - Duration::days(30)).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(service.count_by_poi(&poi.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_by_poi_newest_first_paginated() {
        let (service, poi) = setup().await;
        let now = Utc::now();
        for hours in [3, 1, 2] {
            service
                .create(access(&poi, "WEB", "view", Some(now - Duration::hours(hours))))
                .await
                .unwrap();
        }
        let page = service
            .list_by_poi(&poi.id, Some(Pagination { page: 1, per_page: 2 }))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert!(page[0].accessed_at > page[1].accessed_at);
        assert_eq!(page[0].accessed_at, now - Duration::hours(1));
    }

    #[tokio::test]
    async fn test_lookups_by_type_platform_and_organization() {
        let (service, poi) = setup().await;
        service.create(access(&poi, "android", "view", None)).await.unwrap();
        service.create(access(&poi, "web", "click", None)).await.unwrap();
        service.create(access(&poi, "Web", "view", None)).await.unwrap();

        assert_eq!(service.list_by_access_type(" VIEW ").await.unwrap().len(), 2);
        assert_eq!(service.list_by_platform("web").await.unwrap().len(), 2);
        assert_eq!(
            service
                .list_by_poi_and_organization(&poi.id, &poi.organization_id)
                .await
                .unwrap()
                .len(),
            3
        );
        assert!(service
            .list_by_poi_and_organization(&poi.id, &Uuid::new_v4())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_moves_log_with_its_poi() {
        let (service, poi) = setup().await;
        let log = service.create(access(&poi, "WEB", "view", None)).await.unwrap();

        let other = PointOfInterest::new(NewPointOfInterest {
            organization_id: Uuid::new_v4(),
            name: "Mont Fébé".to_string(),
            poi_type: "LANDMARK".to_string(),
            category: "Nature".to_string(),
            ..Default::default()
        })
        .unwrap();
        service.poi_repo.create(&other).await.unwrap();

        let updated = service
            .update(
                &log.id,
                AccessLogChanges {
                    poi_id: Some(other.id),
                    access_type: Some("Click".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, log.id);
        assert_eq!(updated.poi_id, other.id);
        assert_eq!(updated.organization_id, other.organization_id);
        assert_eq!(updated.access_type.as_deref(), Some("click"));
        assert_eq!(updated.platform_type, "WEB");
        assert_eq!(service.get(&log.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_log_and_poi() {
        let (service, poi) = setup().await;
        let missing = Uuid::new_v4();
        assert_eq!(
            service.update(&missing, AccessLogChanges::default()).await.unwrap_err(),
            DomainError::AccessLogNotFound(missing)
        );

        let log = service.create(access(&poi, "WEB", "view", None)).await.unwrap();
        let result = service
            .update(
                &log.id,
                AccessLogChanges {
                    poi_id: Some(missing),
                    ..Default::default()
                },
            )
            .await;
        assert_eq!(result.unwrap_err(), DomainError::PoiNotFound(missing));
        assert_eq!(service.get(&log.id).await.unwrap().poi_id, poi.id);
    }

    #[tokio::test]
    async fn test_unknown_poi() {
        let (service, poi) = setup().await;
        let mut input = access(&poi, "WEB", "view", None);
        input.poi_id = Uuid::new_v4();
        assert!(matches!(service.create(input).await, Err(DomainError::PoiNotFound(_))));
    }
}
