//! POI access log domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PoiAccessLog {
    pub id: Uuid,
    pub poi_id: Uuid,
    pub organization_id: Uuid,

    /// e.g. ANDROID, IOS, WEB, LINUX, WINDOWS
    #[validate(length(min = 1, max = 50, message = "Platform type is required"))]
    pub platform_type: String,

    pub user_id: Option<Uuid>,

    /// e.g. view, click, review
    pub access_type: Option<String>,

    pub accessed_at: DateTime<Utc>,
    pub metadata: Option<JsonValue>,
}

/// Fields of an access log that may be rewritten. A new `poi_id` is resolved
/// by the caller, which also carries over the POI's organization.
#[derive(Debug, Clone, Default)]
pub struct AccessLogChanges {
    pub poi_id: Option<Uuid>,
    pub platform_type: Option<String>,
    pub user_id: Option<Uuid>,
    pub access_type: Option<String>,
    pub accessed_at: Option<DateTime<Utc>>,
    pub metadata: Option<JsonValue>,
}

/// Access count for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCount {
    pub platform_type: String,
    pub count: i64,
}

impl PoiAccessLog {
    pub fn new(
        poi_id: Uuid,
        organization_id: Uuid,
        platform_type: String,
        user_id: Option<Uuid>,
        access_type: Option<String>,
        accessed_at: Option<DateTime<Utc>>,
        metadata: Option<JsonValue>,
    ) -> Result<Self, validator::ValidationErrors> {
        let log = Self {
            id: Uuid::new_v4(),
            poi_id,
            organization_id,
            platform_type: platform_type.trim().to_uppercase(),
            user_id,
            access_type: access_type.map(|t| t.trim().to_lowercase()),
            accessed_at: accessed_at.unwrap_or_else(Utc::now),
            metadata,
        };

        log.validate()?;
        Ok(log)
    }

    pub fn apply_changes(&mut self, changes: AccessLogChanges) -> Result<(), validator::ValidationErrors> {
        if let Some(platform_type) = changes.platform_type {
            self.platform_type = platform_type.trim().to_uppercase();
        }
        if let Some(user_id) = changes.user_id {
            self.user_id = Some(user_id);
        }
        if let Some(access_type) = changes.access_type {
            self.access_type = Some(access_type.trim().to_lowercase());
        }
        if let Some(accessed_at) = changes.accessed_at {
            self.accessed_at = accessed_at;
        }
        if let Some(metadata) = changes.metadata {
            self.metadata = Some(metadata);
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> PoiAccessLog {
        PoiAccessLog::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            " android ".to_string(),
            None,
            Some("VIEW".to_string()),
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_new_normalizes_platform_and_access_type() {
        let log = log();
        assert_eq!(log.platform_type, "ANDROID");
        assert_eq!(log.access_type.as_deref(), Some("view"));
    }

    #[test]
    fn test_apply_changes_keeps_unset_fields() {
        let mut log = log();
        let accessed_at = log.accessed_at;
        log.apply_changes(AccessLogChanges {
            platform_type: Some("web".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(log.platform_type, "WEB");
        assert_eq!(log.access_type.as_deref(), Some("view"));
        assert_eq!(log.accessed_at, accessed_at);
    }

    #[test]
    fn test_apply_changes_rejects_blank_platform() {
        let mut log = log();
        let result = log.apply_changes(AccessLogChanges {
            platform_type: Some("   ".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
