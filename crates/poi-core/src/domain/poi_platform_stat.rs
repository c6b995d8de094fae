//! Daily per-platform statistics for an organization or one of its POIs

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PoiPlatformStat {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// `None` for organization-wide figures
    pub poi_id: Option<Uuid>,

    #[validate(length(min = 1, max = 50, message = "Platform type is required"))]
    pub platform_type: String,

    pub stat_date: NaiveDate,

    #[validate(range(min = 0, message = "Views cannot be negative"))]
    pub views: i32,
    #[validate(range(min = 0, message = "Reviews cannot be negative"))]
    pub reviews: i32,
    #[validate(range(min = 0, message = "Likes cannot be negative"))]
    pub likes: i32,
    #[validate(range(min = 0, message = "Dislikes cannot be negative"))]
    pub dislikes: i32,
}

#[derive(Debug, Clone, Default)]
pub struct NewPlatformStat {
    pub organization_id: Uuid,
    pub poi_id: Option<Uuid>,
    pub platform_type: String,
    pub stat_date: Option<NaiveDate>,
    pub views: Option<i32>,
    pub reviews: Option<i32>,
    pub likes: Option<i32>,
    pub dislikes: Option<i32>,
}

impl PoiPlatformStat {
    pub fn new(input: NewPlatformStat) -> Result<Self, validator::ValidationErrors> {
        let stat = Self {
            id: Uuid::new_v4(),
            organization_id: input.organization_id,
            poi_id: input.poi_id,
            platform_type: input.platform_type.trim().to_uppercase(),
            stat_date: input.stat_date.unwrap_or_else(|| Utc::now().date_naive()),
            views: input.views.unwrap_or(0),
            reviews: input.reviews.unwrap_or(0),
            likes: input.likes.unwrap_or(0),
            dislikes: input.dislikes.unwrap_or(0),
        };

        stat.validate()?;
        Ok(stat)
    }

    /// Replaces every mutable field, keeping the identifier.
    pub fn replace_with(&mut self, input: NewPlatformStat) -> Result<(), validator::ValidationErrors> {
        let id = self.id;
        *self = Self::new(input)?;
        self.id = id;
        Ok(())
    }
}
