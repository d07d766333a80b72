//! HTTP routes for spindle-ui

pub mod health;
pub mod items;
pub mod pages;
pub mod sse;

pub use health::health_routes;
pub use items::{submit_item, ItemFormBody};
pub use pages::{cancel_form, index, open_form};
pub use sse::event_stream;
