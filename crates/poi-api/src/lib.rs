//! # POI API
//! 
//! HTTP handlers, DTOs, the response envelope, and WebSocket notification delivery.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod notifications;
pub mod response;
pub mod routes;
pub mod state;

pub use notifications::NotificationBroker;
pub use routes::build_router;
pub use state::{AppState, Repositories};
