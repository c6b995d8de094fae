use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::PoiPlatformStat;
use crate::error::DomainError;
use crate::repositories::PoiPlatformStatRepository;

#[derive(Default)]
pub struct InMemoryPoiPlatformStatRepository {
    inner: RwLock<HashMap<Uuid, PoiPlatformStat>>,
}

impl InMemoryPoiPlatformStatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_by_date(&self, predicate: impl Fn(&PoiPlatformStat) -> bool) -> Vec<PoiPlatformStat> {
        let store = self.inner.read();
        let mut stats: Vec<_> = store.values().filter(|&s| predicate(s)).cloned().collect();
        stats.sort_by(|a, b| {
            b.stat_date
                .cmp(&a.stat_date)
                .then_with(|| a.platform_type.cmp(&b.platform_type))
        });
        stats
    }

    fn remove_where(&self, predicate: impl Fn(&PoiPlatformStat) -> bool) -> u64 {
        let mut store = self.inner.write();
        let before = store.len();
        store.retain(|_, s| !predicate(s));
        (before - store.len()) as u64
    }
}

#[async_trait]
impl PoiPlatformStatRepository for InMemoryPoiPlatformStatRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PoiPlatformStat>, DomainError> {
        Ok(self.inner.read().get(id).cloned())
    }

    async fn find_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PoiPlatformStat>, DomainError> {
        Ok(self.collect_by_date(|s| s.organization_id == *organization_id))
    }

    async fn find_by_poi(&self, poi_id: &Uuid) -> Result<Vec<PoiPlatformStat>, DomainError> {
        Ok(self.collect_by_date(|s| s.poi_id == Some(*poi_id)))
    }

    async fn find_by_platform(&self, platform_type: &str) -> Result<Vec<PoiPlatformStat>, DomainError> {
        Ok(self.collect_by_date(|s| s.platform_type == platform_type))
    }

    async fn find_by_date(&self, stat_date: NaiveDate) -> Result<Vec<PoiPlatformStat>, DomainError> {
        Ok(self.collect_by_date(|s| s.stat_date == stat_date))
    }

    async fn find_by_organization_and_date_range(
        &self,
        organization_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PoiPlatformStat>, DomainError> {
        Ok(self.collect_by_date(|s| {
            s.organization_id == *organization_id && s.stat_date >= start && s.stat_date <= end
        }))
    }

    async fn exists(&self, id: &Uuid) -> Result<bool, DomainError> {
        Ok(self.inner.read().contains_key(id))
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.inner.read().len() as i64)
    }

    async fn create(&self, stat: &PoiPlatformStat) -> Result<PoiPlatformStat, DomainError> {
        self.inner.write().insert(stat.id, stat.clone());
        Ok(stat.clone())
    }

    async fn update(&self, stat: &PoiPlatformStat) -> Result<PoiPlatformStat, DomainError> {
        let mut store = self.inner.write();
        match store.get_mut(&stat.id) {
            Some(existing) => {
                *existing = stat.clone();
                Ok(stat.clone())
            }
            None => Err(DomainError::StatNotFound(stat.id)),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        Ok(self.inner.write().remove(id).is_some())
    }

    async fn delete_by_organization(&self, organization_id: &Uuid) -> Result<u64, DomainError> {
        Ok(self.remove_where(|s| s.organization_id == *organization_id))
    }

    async fn delete_by_poi(&self, poi_id: &Uuid) -> Result<u64, DomainError> {
        Ok(self.remove_where(|s| s.poi_id == Some(*poi_id)))
    }
}
