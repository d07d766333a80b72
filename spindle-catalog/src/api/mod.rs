//! HTTP API handlers for spindle-catalog

pub mod health;
pub mod items;

pub use health::health_routes;
pub use items::{create_item, get_item, list_items};
