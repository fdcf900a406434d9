//! Content item records as projected by the content item index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A content item version as seen through the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Identifier shared by all versions of the item.
    pub content_item_id: Uuid,

    /// Identifier of this version.
    pub content_item_version_id: Uuid,

    /// Content type machine name.
    pub content_type: String,

    /// Display text (usually the title).
    #[serde(default)]
    pub display_text: String,

    /// This version is the published one.
    pub published: bool,

    /// This version is the most recent one.
    pub latest: bool,

    /// Owner user name.
    pub owner: Option<String>,

    /// Author user name of this version.
    pub author: Option<String>,

    pub created_utc: Option<DateTime<Utc>>,
    pub modified_utc: Option<DateTime<Utc>>,
    pub published_utc: Option<DateTime<Utc>>,
}

impl ContentItem {
    /// Check if this is a draft: latest and not published.
    pub fn is_draft(&self) -> bool {
        self.latest && !self.published
    }
}

/// Creates fresh, unsaved content items.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentManager;

impl ContentManager {
    /// Instantiate a new item of the given type.
    ///
    /// The item is not persisted; it is used as the resource of
    /// type-scoped authorization checks.
    pub fn new_item(&self, content_type: &str) -> ContentItem {
        ContentItem {
            content_item_id: Uuid::now_v7(),
            content_item_version_id: Uuid::now_v7(),
            content_type: content_type.to_string(),
            display_text: String::new(),
            published: false,
            latest: true,
            owner: None,
            author: None,
            created_utc: None,
            modified_utc: None,
            published_utc: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn new_item_is_an_unowned_draft() {
        let item = ContentManager.new_item("Page");

        assert_eq!(item.content_type, "Page");
        assert!(item.is_draft());
        assert!(item.owner.is_none());
        assert!(item.created_utc.is_none());
    }

    #[test]
    fn new_items_get_distinct_ids() {
        let a = ContentManager.new_item("Page");
        let b = ContentManager.new_item("Page");
        assert_ne!(a.content_item_id, b.content_item_id);
    }

    #[test]
    fn serializes_camel_case() {
        let item = ContentManager.new_item("Page");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["contentType"], "Page");
        assert_eq!(json["latest"], true);
        assert!(json.get("contentItemVersionId").is_some());
    }
}
