//! POI access log repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use poi_shared::Pagination;
use uuid::Uuid;
use crate::domain::{PlatformCount, PoiAccessLog};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoiAccessLogRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PoiAccessLog>, DomainError>;
    /// Newest first
    async fn find_by_poi(
        &self,
        poi_id: &Uuid,
        pagination: Option<Pagination>,
    ) -> Result<Vec<PoiAccessLog>, DomainError>;
    async fn find_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PoiAccessLog>, DomainError>;
    async fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<PoiAccessLog>, DomainError>;
    /// Expects the lowercased access type
    async fn find_by_access_type(&self, access_type: &str) -> Result<Vec<PoiAccessLog>, DomainError>;
    /// Expects the uppercased platform type
    async fn find_by_platform(&self, platform_type: &str) -> Result<Vec<PoiAccessLog>, DomainError>;
    async fn find_by_poi_and_organization(
        &self,
        poi_id: &Uuid,
        organization_id: &Uuid,
    ) -> Result<Vec<PoiAccessLog>, DomainError>;
    /// Inclusive on both ends
    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PoiAccessLog>, DomainError>;
    async fn find_recent_by_poi(
        &self,
        poi_id: &Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<PoiAccessLog>, DomainError>;
    async fn count_by_poi(&self, poi_id: &Uuid) -> Result<i64, DomainError>;
    async fn count_by_poi_and_access_type(
        &self,
        poi_id: &Uuid,
        access_type: &str,
    ) -> Result<i64, DomainError>;
    /// Count descending
    async fn platform_counts_by_organization(
        &self,
        organization_id: &Uuid,
    ) -> Result<Vec<PlatformCount>, DomainError>;
    async fn create(&self, log: &PoiAccessLog) -> Result<PoiAccessLog, DomainError>;
    async fn update(&self, log: &PoiAccessLog) -> Result<PoiAccessLog, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
    /// Returns the number of rows removed
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
