//! Coordinates and great-circle distance.
//!
//! Every distance in the system is measured over a sphere of radius
//! [`EARTH_RADIUS_KM`] with the spherical law of cosines:
//!
//! ```text
//! d = R * acos( cos(φ1)·cos(φ2)·cos(λ2 − λ1) + sin(φ1)·sin(φ2) )
//! ```
//!
//! The PostgreSQL repository evaluates the same expression in SQL so that
//! both storage backends agree on what "within the radius" means.

use poi_shared::constants::EARTH_RADIUS_KM;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        validate_latitude(latitude)?;
        validate_longitude(longitude)?;
        Ok(Self { latitude, longitude })
    }

    /// Builds a location from independently optional columns or fields.
    ///
    /// Both present yields a point, both absent yields `None`, and a lone
    /// coordinate is rejected.
    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, DomainError> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).map(Some),
            (None, None) => Ok(None),
            _ => Err(DomainError::ValidationError(
                "latitude and longitude must be provided together".to_string(),
            )),
        }
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        distance_km(self, other)
    }
}

pub fn validate_latitude(latitude: f64) -> Result<(), DomainError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(DomainError::ValidationError(format!(
            "latitude must be within [-90, 90], got {}",
            latitude
        )));
    }
    Ok(())
}

pub fn validate_longitude(longitude: f64) -> Result<(), DomainError> {
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(DomainError::ValidationError(format!(
            "longitude must be within [-180, 180], got {}",
            longitude
        )));
    }
    Ok(())
}

pub fn validate_radius(radius_km: f64) -> Result<(), DomainError> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(DomainError::ValidationError(format!(
            "radius must be a positive number of kilometers, got {}",
            radius_km
        )));
    }
    Ok(())
}

/// Great-circle distance in kilometers.
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lon = b.longitude.to_radians() - a.longitude.to_radians();

    let cosine = lat1.cos() * lat2.cos() * delta_lon.cos() + lat1.sin() * lat2.sin();

    // Rounding can push identical points slightly above 1.0
    EARTH_RADIUS_KM * cosine.clamp(-1.0, 1.0).acos()
}
