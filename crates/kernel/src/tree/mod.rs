//! Admin content tree.
//!
//! This module provides:
//! - TreeNode: a navigable node
//! - TreeNodeProvider: trait for a branch of the tree, plus a registry by id
//! - ContentTreeNodeProvider: content types and their items
//! - UrlHelper / Localizer: link generation and labels

mod content;
mod node;
mod provider;
mod url;

pub use content::{
    CONTENT_TYPE_NODE_TYPE, CONTENT_TYPES_NODE_TYPE, ContentTreeNodeProvider, ITEMS_ACTION,
    ITEMS_AREA, ITEMS_CONTROLLER, ROOT_NODE_TYPE, TYPENAME_PARAM,
};
pub use node::TreeNode;
pub use provider::{TreeNodeProvider, TreeProviderRegistry};
pub use url::{AdminUrlHelper, Localizer, StaticLocalizer, UrlHelper};
