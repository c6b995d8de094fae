//! Request and response shapes of the HTTP surface

pub mod common;
pub mod poi;
pub mod organization;
pub mod user;
pub mod review;
pub mod access_log;
pub mod platform_stat;
pub mod notification;

pub use common::{CountResponse, DeletedResponse, ExistsResponse, PageParams};
