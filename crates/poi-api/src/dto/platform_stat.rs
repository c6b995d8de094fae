use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use poi_core::domain::NewPlatformStat;

/// Body of both create and full replacement.
#[derive(Debug, Deserialize)]
pub struct PlatformStatRequest {
    pub organization_id: Uuid,
    pub poi_id: Option<Uuid>,
    pub platform_type: String,
    pub stat_date: Option<NaiveDate>,
    pub views: Option<i32>,
    pub reviews: Option<i32>,
    pub likes: Option<i32>,
    pub dislikes: Option<i32>,
}

impl From<PlatformStatRequest> for NewPlatformStat {
    fn from(req: PlatformStatRequest) -> Self {
        Self {
            organization_id: req.organization_id,
            poi_id: req.poi_id,
            platform_type: req.platform_type,
            stat_date: req.stat_date,
            views: req.views,
            reviews: req.reviews,
            likes: req.likes,
            dislikes: req.dislikes,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StatDateRangeParams {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}
