//! # POI Core
//! 
//! Domain entities, the geospatial search and ranking core, repository
//! traits, and services for the Yow Point backend.

pub mod domain;
pub mod geo;
pub mod search;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
