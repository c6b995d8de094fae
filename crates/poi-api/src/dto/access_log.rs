use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use poi_core::domain::AccessLogChanges;
use poi_core::services::NewAccessLog;

#[derive(Debug, Deserialize)]
pub struct CreateAccessLogRequest {
    pub poi_id: Uuid,
    pub platform_type: String,
    pub user_id: Option<Uuid>,
    pub access_type: Option<String>,
    pub accessed_at: Option<DateTime<Utc>>,
    pub metadata: Option<JsonValue>,
}

impl From<CreateAccessLogRequest> for NewAccessLog {
    fn from(req: CreateAccessLogRequest) -> Self {
        Self {
            poi_id: req.poi_id,
            platform_type: req.platform_type,
            user_id: req.user_id,
            access_type: req.access_type,
            accessed_at: req.accessed_at,
            metadata: req.metadata,
        }
    }
}

/// Partial rewrite; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAccessLogRequest {
    pub poi_id: Option<Uuid>,
    pub platform_type: Option<String>,
    pub user_id: Option<Uuid>,
    pub access_type: Option<String>,
    pub accessed_at: Option<DateTime<Utc>>,
    pub metadata: Option<JsonValue>,
}

impl From<UpdateAccessLogRequest> for AccessLogChanges {
    fn from(req: UpdateAccessLogRequest) -> Self {
        Self {
            poi_id: req.poi_id,
            platform_type: req.platform_type,
            user_id: req.user_id,
            access_type: req.access_type,
            accessed_at: req.accessed_at,
            metadata: req.metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SinceParams {
    pub since: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PurgeParams {
    pub before: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AccessCountParams {
    pub access_type: Option<String>,
}
