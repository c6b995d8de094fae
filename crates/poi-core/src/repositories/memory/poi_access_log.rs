use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use poi_shared::Pagination;
use uuid::Uuid;

use crate::domain::{PlatformCount, PoiAccessLog};
use crate::error::DomainError;
use crate::repositories::PoiAccessLogRepository;

#[derive(Default)]
pub struct InMemoryPoiAccessLogRepository {
    inner: RwLock<HashMap<Uuid, PoiAccessLog>>,
}

impl InMemoryPoiAccessLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_newest_first(&self, predicate: impl Fn(&PoiAccessLog) -> bool) -> Vec<PoiAccessLog> {
        let store = self.inner.read();
        let mut logs: Vec<_> = store.values().filter(|&l| predicate(l)).cloned().collect();
        logs.sort_by(|a, b| b.accessed_at.cmp(&a.accessed_at).then_with(|| a.id.cmp(&b.id)));
        logs
    }
}

#[async_trait]
impl PoiAccessLogRepository for InMemoryPoiAccessLogRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PoiAccessLog>, DomainError> {
        Ok(self.inner.read().get(id).cloned())
    }

    async fn find_by_poi(
        &self,
        poi_id: &Uuid,
        pagination: Option<Pagination>,
    ) -> Result<Vec<PoiAccessLog>, DomainError> {
        let logs = self.collect_newest_first(|l| l.poi_id == *poi_id);
        Ok(match pagination {
            Some(p) => p.apply(logs),
            None => logs,
        })
    }

    async fn find_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PoiAccessLog>, DomainError> {
        Ok(self.collect_newest_first(|l| l.organization_id == *organization_id))
    }

    async fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<PoiAccessLog>, DomainError> {
        Ok(self.collect_newest_first(|l| l.user_id == Some(*user_id)))
    }

    async fn find_by_access_type(&self, access_type: &str) -> Result<Vec<PoiAccessLog>, DomainError> {
        Ok(self.collect_newest_first(|l| l.access_type.as_deref() == Some(access_type)))
    }

    async fn find_by_platform(&self, platform_type: &str) -> Result<Vec<PoiAccessLog>, DomainError> {
        Ok(self.collect_newest_first(|l| l.platform_type == platform_type))
    }

    async fn find_by_poi_and_organization(
        &self,
        poi_id: &Uuid,
        organization_id: &Uuid,
    ) -> Result<Vec<PoiAccessLog>, DomainError> {
        Ok(self.collect_newest_first(|l| {
            l.poi_id == *poi_id && l.organization_id == *organization_id
        }))
    }

    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PoiAccessLog>, DomainError> {
        Ok(self.collect_newest_first(|l| l.accessed_at >= start && l.accessed_at <= end))
    }

    async fn find_recent_by_poi(
        &self,
        poi_id: &Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<PoiAccessLog>, DomainError> {
        Ok(self.collect_newest_first(|l| l.poi_id == *poi_id && l.accessed_at >= since))
    }

    async fn count_by_poi(&self, poi_id: &Uuid) -> Result<i64, DomainError> {
        let store = self.inner.read();
        Ok(store.values().filter(|l| l.poi_id == *poi_id).count() as i64)
    }

    async fn count_by_poi_and_access_type(
        &self,
        poi_id: &Uuid,
        access_type: &str,
    ) -> Result<i64, DomainError> {
        let access_type = access_type.to_lowercase();
        let store = self.inner.read();
        Ok(store
            .values()
            .filter(|l| l.poi_id == *poi_id && l.access_type.as_deref() == Some(access_type.as_str()))
            .count() as i64)
    }

    async fn platform_counts_by_organization(
        &self,
        organization_id: &Uuid,
    ) -> Result<Vec<PlatformCount>, DomainError> {
        let store = self.inner.read();
        let mut counts: HashMap<&str, i64> = HashMap::new();
        for log in store.values().filter(|l| l.organization_id == *organization_id) {
            *counts.entry(log.platform_type.as_str()).or_default() += 1;
        }
        let mut counts: Vec<PlatformCount> = counts
            .into_iter()
            .map(|(platform_type, count)| PlatformCount {
                platform_type: platform_type.to_string(),
                count,
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.platform_type.cmp(&b.platform_type)));
        Ok(counts)
    }

    async fn create(&self, log: &PoiAccessLog) -> Result<PoiAccessLog, DomainError> {
        self.inner.write().insert(log.id, log.clone());
        Ok(log.clone())
    }

    async fn update(&self, log: &PoiAccessLog) -> Result<PoiAccessLog, DomainError> {
        let mut store = self.inner.write();
        match store.get_mut(&log.id) {
            Some(existing) => {
                *existing = log.clone();
                Ok(log.clone())
            }
            None => Err(DomainError::AccessLogNotFound(log.id)),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        Ok(self.inner.write().remove(id).is_some())
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut store = self.inner.write();
        let before = store.len();
        store.retain(|_, l| l.accessed_at >= cutoff);
        Ok((before - store.len()) as u64)
    }
}
