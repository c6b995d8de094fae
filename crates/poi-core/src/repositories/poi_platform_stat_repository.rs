//! Platform statistics repository trait (port)

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;
use crate::domain::PoiPlatformStat;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoiPlatformStatRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PoiPlatformStat>, DomainError>;
    async fn find_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PoiPlatformStat>, DomainError>;
    async fn find_by_poi(&self, poi_id: &Uuid) -> Result<Vec<PoiPlatformStat>, DomainError>;
    /// Expects the uppercased platform type
    async fn find_by_platform(&self, platform_type: &str) -> Result<Vec<PoiPlatformStat>, DomainError>;
    async fn find_by_date(&self, stat_date: NaiveDate) -> Result<Vec<PoiPlatformStat>, DomainError>;
    async fn find_by_organization_and_date_range(
        &self,
        organization_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PoiPlatformStat>, DomainError>;
    async fn exists(&self, id: &Uuid) -> Result<bool, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    async fn create(&self, stat: &PoiPlatformStat) -> Result<PoiPlatformStat, DomainError>;
    async fn update(&self, stat: &PoiPlatformStat) -> Result<PoiPlatformStat, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
    async fn delete_by_organization(&self, organization_id: &Uuid) -> Result<u64, DomainError>;
    async fn delete_by_poi(&self, poi_id: &Uuid) -> Result<u64, DomainError>;
}
