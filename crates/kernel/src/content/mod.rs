//! Content management module.
//!
//! This module provides:
//! - ContentTypeRegistry: content type definitions with typed settings
//! - ContentItem: index projection of a content item version
//! - ContentManager: instantiates unsaved items

mod item;
mod type_registry;

pub use item::{ContentItem, ContentManager};
pub use type_registry::{ContentTypeDefinition, ContentTypeRegistry, ContentTypeSettings};
