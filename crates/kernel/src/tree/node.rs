//! Tree node value type.

use serde::{Deserialize, Serialize};

/// A navigable entry in the admin content tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub title: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub id: String,
    pub is_leaf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_ui_field_names() {
        let node = TreeNode {
            title: "Page".into(),
            node_type: "content-type".into(),
            id: "Page".into(),
            is_leaf: true,
            url: Some("/admin/content-tree/items".into()),
        };

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "content-type");
        assert_eq!(json["isLeaf"], true);
        assert_eq!(json["url"], "/admin/content-tree/items");
    }

    #[test]
    fn missing_url_is_omitted() {
        let node = TreeNode {
            title: "Content Types".into(),
            node_type: "content-types".into(),
            id: "content-types".into(),
            ..Default::default()
        };

        let json = serde_json::to_value(&node).unwrap();
        assert!(json.get("url").is_none());
        assert_eq!(json["isLeaf"], false);
    }
}
