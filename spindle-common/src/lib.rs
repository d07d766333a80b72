//! # Spindle Common Library
//!
//! Shared code for the Spindle services including:
//! - Collection data model and wire types
//! - Display ordering comparator
//! - Configuration resolution (environment / TOML / compiled defaults)
//! - Common error type

pub mod config;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{CollectionItem, MediaFormat, NewCollectionItem};
