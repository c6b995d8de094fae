//! Real-time notification delivery

pub mod broker;

pub use broker::{NotificationBroker, Subscription};
