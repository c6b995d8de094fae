//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Mean Earth radius used by every distance computation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const DEFAULT_RADIUS_KM: f64 = 10.0;
pub const DEFAULT_POPULAR_LIMIT: i64 = 10;

pub const MIN_POPULARITY_SCORE: f64 = 0.0;
pub const MAX_POPULARITY_SCORE: f64 = 100.0;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_NOTIFICATION_CHANNEL_CAPACITY: usize = 256;
