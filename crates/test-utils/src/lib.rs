//! Canopy test utilities.
//!
//! Fixtures for content tree tests: content item builders, test users,
//! content type documents, and assertion helpers.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Fixed reference time so fixture timestamps are reproducible.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Create a test item: latest, unpublished, unowned.
pub fn test_item(content_type: &str, title: &str) -> TestItem {
    TestItem {
        content_item_id: Uuid::now_v7(),
        content_item_version_id: Uuid::now_v7(),
        content_type: content_type.to_string(),
        display_text: title.to_string(),
        published: false,
        latest: true,
        owner: None,
        author: None,
        created_utc: None,
        modified_utc: None,
        published_utc: None,
    }
}

/// A content item builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestItem {
    pub content_item_id: Uuid,
    pub content_item_version_id: Uuid,
    pub content_type: String,
    pub display_text: String,
    pub published: bool,
    pub latest: bool,
    pub owner: Option<String>,
    pub author: Option<String>,
    pub created_utc: Option<DateTime<Utc>>,
    pub modified_utc: Option<DateTime<Utc>>,
    pub published_utc: Option<DateTime<Utc>>,
}

impl TestItem {
    /// Published and latest, published at the modified time if set.
    pub fn published(mut self) -> Self {
        self.published = true;
        self.latest = true;
        if self.published_utc.is_none() {
            self.published_utc = self.modified_utc.or(Some(base_time()));
        }
        self
    }

    /// An older, published version superseded by a newer draft.
    pub fn superseded(mut self) -> Self {
        self.published = true;
        self.latest = false;
        self
    }

    /// Set the owner (and author).
    pub fn owned_by(mut self, owner: &str) -> Self {
        self.owner = Some(owner.to_string());
        self.author = Some(owner.to_string());
        self
    }

    /// Set created time to `base_time() + days`.
    pub fn created_on_day(mut self, days: i64) -> Self {
        self.created_utc = Some(base_time() + Duration::days(days));
        self
    }

    /// Set modified time to `base_time() + days`.
    pub fn modified_on_day(mut self, days: i64) -> Self {
        self.modified_utc = Some(base_time() + Duration::days(days));
        self
    }

    /// Set published time to `base_time() + days`.
    pub fn published_on_day(mut self, days: i64) -> Self {
        self.published_utc = Some(base_time() + Duration::days(days));
        self
    }

    /// Share the item id of another fixture (another version of it).
    pub fn version_of(mut self, other: &TestItem) -> Self {
        self.content_item_id = other.content_item_id;
        self
    }

    /// JSON in the shape the content item index serializes to.
    pub fn to_json(&self) -> JsonValue {
        serde_json::json!({
            "contentItemId": self.content_item_id,
            "contentItemVersionId": self.content_item_version_id,
            "contentType": self.content_type,
            "displayText": self.display_text,
            "published": self.published,
            "latest": self.latest,
            "owner": self.owner,
            "author": self.author,
            "createdUtc": self.created_utc,
            "modifiedUtc": self.modified_utc,
            "publishedUtc": self.published_utc,
        })
    }
}

/// Create a test user with roles.
pub fn test_user(name: &str, roles: &[&str]) -> TestUser {
    TestUser {
        name: name.to_string(),
        roles: roles.iter().map(|s| s.to_string()).collect(),
    }
}

/// Create an administrator test user.
pub fn admin_user() -> TestUser {
    test_user("admin", &["administrator"])
}

/// A test user builder.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub name: String,
    pub roles: Vec<String>,
}

impl TestUser {
    /// Add a role.
    pub fn with_role(mut self, role: &str) -> Self {
        self.roles.push(role.to_string());
        self
    }

    /// Value of the roles header.
    pub fn roles_header(&self) -> String {
        self.roles.join(",")
    }

    /// JSON in the shape of a serialized current user.
    pub fn to_json(&self) -> JsonValue {
        serde_json::json!({
            "id": Uuid::now_v7(),
            "name": self.name,
            "roles": self.roles,
        })
    }
}

/// Assertion helpers for JSON content.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that timestamps never increase along the slice.
    pub fn non_increasing<T: PartialOrd + std::fmt::Debug>(values: &[T]) {
        for pair in values.windows(2) {
            assert!(
                pair[0] >= pair[1],
                "Expected non-increasing order, found {:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    /// Assert that timestamps never decrease along the slice.
    pub fn non_decreasing<T: PartialOrd + std::fmt::Debug>(values: &[T]) {
        for pair in values.windows(2) {
            assert!(
                pair[0] <= pair[1],
                "Expected non-decreasing order, found {:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

/// Content type documents for testing.
pub mod content_types {
    /// Page is creatable and listable; Widget is listable only.
    pub const PAGE_AND_WIDGET: &str = r#"
types:
  - name: Page
    display_name: Page
    settings:
      creatable: true
      listable: true
  - name: Widget
    display_name: Widget
    settings:
      creatable: false
      listable: true
"#;

    /// A mixed registry exercising ordering and visibility.
    pub const SITE: &str = r#"
types:
  - name: Page
    display_name: Page
    settings:
      creatable: true
      listable: true
  - name: BlogPost
    display_name: Blog Post
    settings:
      creatable: true
      listable: true
      securable: true
  - name: Article
    display_name: Article
    settings:
      creatable: true
      listable: false
  - name: Menu
    display_name: Menu
    settings:
      listable: true
  - name: Footer
    display_name: Footer
"#;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_item_builder() {
        let item = test_item("Page", "About")
            .modified_on_day(3)
            .published()
            .owned_by("alice");

        assert_eq!(item.content_type, "Page");
        assert!(item.published);
        assert!(item.latest);
        assert_eq!(item.published_utc, item.modified_utc);
        assert_eq!(item.owner.as_deref(), Some("alice"));
    }

    #[test]
    fn superseded_version_shares_item_id() {
        let draft = test_item("Page", "About");
        let old = test_item("Page", "About").version_of(&draft).superseded();

        assert_eq!(old.content_item_id, draft.content_item_id);
        assert_ne!(old.content_item_version_id, draft.content_item_version_id);
        assert!(!old.latest);
    }

    #[test]
    fn item_json_uses_camel_case() {
        let json = test_item("Page", "About").to_json();
        assert::has_key(&json, "contentType");
        assert::has_key(&json, "contentItemVersionId");
        assert_eq!(json["publishedUtc"], JsonValue::Null);
    }

    #[test]
    fn test_user_builder() {
        let user = test_user("alice", &["author"]).with_role("editor");
        assert_eq!(user.roles_header(), "author,editor");
        assert_eq!(admin_user().roles, vec!["administrator"]);
    }

    #[test]
    fn ordering_assertions() {
        assert::non_increasing(&[3, 2, 2, 1]);
        assert::non_decreasing(&[1, 1, 4]);
        assert::contains("hello world", "world");
        assert::not_contains("hello world", "foo");
    }
}
