//! Daily per-platform statistics

use std::sync::Arc;
use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::domain::{NewPlatformStat, PoiPlatformStat};
use crate::error::DomainError;
use crate::repositories::PoiPlatformStatRepository;

pub struct PlatformStatService {
    stat_repo: Arc<dyn PoiPlatformStatRepository>,
}

impl PlatformStatService {
    pub fn new(stat_repo: Arc<dyn PoiPlatformStatRepository>) -> Self {
        Self { stat_repo }
    }

    pub async fn create(&self, input: NewPlatformStat) -> Result<PoiPlatformStat, DomainError> {
        let stat = PoiPlatformStat::new(input)?;
        let created = self.stat_repo.create(&stat).await?;
        info!(
            "Platform stat created for organization {} on {}",
            created.organization_id, created.stat_date
        );
        Ok(created)
    }

    pub async fn get(&self, id: &Uuid) -> Result<PoiPlatformStat, DomainError> {
        self.stat_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::StatNotFound(*id))
    }

    pub async fn list_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PoiPlatformStat>, DomainError> {
        self.stat_repo.find_by_organization(organization_id).await
    }

    pub async fn list_by_poi(&self, poi_id: &Uuid) -> Result<Vec<PoiPlatformStat>, DomainError> {
        self.stat_repo.find_by_poi(poi_id).await
    }

    pub async fn list_by_platform(&self, platform_type: &str) -> Result<Vec<PoiPlatformStat>, DomainError> {
        self.stat_repo
            .find_by_platform(&platform_type.trim().to_uppercase())
            .await
    }

    pub async fn list_by_date(&self, stat_date: NaiveDate) -> Result<Vec<PoiPlatformStat>, DomainError> {
        self.stat_repo.find_by_date(stat_date).await
    }

    pub async fn exists(&self, id: &Uuid) -> Result<bool, DomainError> {
        self.stat_repo.exists(id).await
    }

    pub async fn list_by_organization_and_date_range(
        &self,
        organization_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PoiPlatformStat>, DomainError> {
        if start > end {
            return Err(DomainError::ValidationError(
                "start date must not be after end date".to_string(),
            ));
        }
        self.stat_repo
            .find_by_organization_and_date_range(organization_id, start, end)
            .await
    }

    pub async fn update(&self, id: &Uuid, input: NewPlatformStat) -> Result<PoiPlatformStat, DomainError> {
        let mut stat = self.get(id).await?;
        stat.replace_with(input)?;
        let updated = self.stat_repo.update(&stat).await?;
        info!("Platform stat updated: {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        if !self.stat_repo.delete(id).await? {
            return Err(DomainError::StatNotFound(*id));
        }
        Ok(())
    }

    pub async fn delete_by_organization(&self, organization_id: &Uuid) -> Result<u64, DomainError> {
        let removed = self.stat_repo.delete_by_organization(organization_id).await?;
        info!("Removed {} platform stats of organization {}", removed, organization_id);
        Ok(removed)
    }

    pub async fn delete_by_poi(&self, poi_id: &Uuid) -> Result<u64, DomainError> {
        let removed = self.stat_repo.delete_by_poi(poi_id).await?;
        info!("Removed {} platform stats of POI {}", removed, poi_id);
        Ok(removed)
    }

    pub async fn count(&self) -> Result<i64, DomainError> {
        self.stat_repo.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::InMemoryPoiPlatformStatRepository;

    fn stat(org: Uuid, poi: Option<Uuid>, date: &str) -> NewPlatformStat {
        NewPlatformStat {
            organization_id: org,
            poi_id: poi,
            platform_type: "WEB".to_string(),
            stat_date: Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()),
            views: Some(10),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_date_range_and_bulk_delete() {
        let service = PlatformStatService::new(Arc::new(InMemoryPoiPlatformStatRepository::new()));
        let org = Uuid::new_v4();
        let poi = Uuid::new_v4();
        service.create(stat(org, None, "2024-01-01")).await.unwrap();
        service.create(stat(org, Some(poi), "2024-01-15")).await.unwrap();
        service.create(stat(org, Some(poi), "2024-02-01")).await.unwrap();

        let start = NaiveDate::parse_from_str("2024-01-01", "%Y-%m-%d").unwrap();
        let end = NaiveDate::parse_from_str("2024-01-31", "%Y-%m-%d").unwrap();
        let january = service
            .list_by_organization_and_date_range(&org, start, end)
            .await
            .unwrap();
        assert_eq!(january.len(), 2);
        assert!(service
            .list_by_organization_and_date_range(&org, end, start)
            .await
            .is_err());

        assert_eq!(service.delete_by_poi(&poi).await.unwrap(), 2);
        assert_eq!(service.count().await.unwrap(), 1);
        assert_eq!(service.delete_by_organization(&org).await.unwrap(), 1);
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_lookups_by_platform_date_and_existence() {
        let service = PlatformStatService::new(Arc::new(InMemoryPoiPlatformStatRepository::new()));
        let org = Uuid::new_v4();
        let web = service.create(stat(org, None, "2024-05-01")).await.unwrap();
        let mut android = stat(org, None, "2024-05-02");
        android.platform_type = "android".to_string();
        service.create(android).await.unwrap();

        let by_platform = service.list_by_platform(" Android ").await.unwrap();
        assert_eq!(by_platform.len(), 1);
        assert_eq!(by_platform[0].platform_type, "ANDROID");

        let day = NaiveDate::parse_from_str("2024-05-01", "%Y-%m-%d").unwrap();
        let on_day = service.list_by_date(day).await.unwrap();
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].id, web.id);

        assert!(service.exists(&web.id).await.unwrap());
        service.delete(&web.id).await.unwrap();
        assert!(!service.exists(&web.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_replaces_counters() {
        let service = PlatformStatService::new(Arc::new(InMemoryPoiPlatformStatRepository::new()));
        let org = Uuid::new_v4();
        let created = service.create(stat(org, None, "2024-03-01")).await.unwrap();

        let mut input = stat(org, None, "2024-03-01");
        input.likes = Some(4);
        let updated = service.update(&created.id, input).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.likes, 4);

        let mut negative = stat(org, None, "2024-03-01");
        negative.dislikes = Some(-1);
        assert!(service.update(&created.id, negative).await.is_err());
    }
}
