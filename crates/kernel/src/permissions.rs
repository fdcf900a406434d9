//! Authorization checks for content operations.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use async_trait::async_trait;
use tracing::trace;

use crate::content::{ContentItem, ContentTypeRegistry};
use crate::request::CurrentUser;

/// Grants every permission.
pub const ADMINISTER_SITE: &str = "administer site";

/// Edit any content item.
pub const EDIT_CONTENT: &str = "edit content";

/// Edit content items owned by the user.
pub const EDIT_OWN_CONTENT: &str = "edit own content";

/// Type-scoped edit permission, e.g. `edit Page content`.
///
/// Only honoured for securable content types.
pub fn edit_type_content(content_type: &str) -> String {
    format!("edit {content_type} content")
}

/// Decides whether a user may perform an operation on a resource.
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    /// Check `permission` for `user`, optionally scoped to a content item.
    async fn authorize(
        &self,
        user: &CurrentUser,
        permission: &str,
        resource: Option<&ContentItem>,
    ) -> Result<bool>;
}

/// Role based authorizer.
///
/// Each role maps to a set of permission names; a user holds the union of
/// the permissions of their roles.
#[derive(Debug, Clone, Default)]
pub struct PermissionAuthorizer {
    roles: HashMap<String, HashSet<String>>,
    content_types: ContentTypeRegistry,
}

impl PermissionAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content types consulted for the securable setting.
    pub fn with_content_types(mut self, content_types: ContentTypeRegistry) -> Self {
        self.content_types = content_types;
        self
    }

    fn is_securable(&self, content_type: &str) -> bool {
        self.content_types
            .get(content_type)
            .is_some_and(|def| def.settings.securable)
    }

    /// Grant permissions to a role.
    pub fn with_role<I, S>(mut self, role: &str, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles
            .entry(role.to_string())
            .or_default()
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Collect the permissions held by a user.
    fn user_permissions(&self, user: &CurrentUser) -> HashSet<&str> {
        user.roles
            .iter()
            .filter_map(|role| self.roles.get(role))
            .flat_map(|perms| perms.iter().map(String::as_str))
            .collect()
    }
}

#[async_trait]
impl AuthorizationService for PermissionAuthorizer {
    async fn authorize(
        &self,
        user: &CurrentUser,
        permission: &str,
        resource: Option<&ContentItem>,
    ) -> Result<bool> {
        let held = self.user_permissions(user);

        if held.contains(ADMINISTER_SITE) || held.contains(permission) {
            return Ok(true);
        }

        let granted = match (permission, resource) {
            (EDIT_CONTENT, Some(item)) => {
                let owns = item.owner.as_deref() == Some(user.name.as_str());
                (owns && held.contains(EDIT_OWN_CONTENT))
                    || (self.is_securable(&item.content_type)
                        && held.contains(edit_type_content(&item.content_type).as_str()))
            }
            _ => false,
        };

        trace!(user = %user.name, permission, granted, "authorization check");
        Ok(granted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::{ContentManager, ContentTypeDefinition};

    fn authorizer() -> PermissionAuthorizer {
        PermissionAuthorizer::new()
            .with_content_types(ContentTypeRegistry::from_definitions([
                ContentTypeDefinition::new("Page", "Page").securable(),
                ContentTypeDefinition::new("Article", "Article"),
            ]))
            .with_role("administrator", [ADMINISTER_SITE])
            .with_role("editor", [EDIT_CONTENT])
            .with_role("author", [EDIT_OWN_CONTENT])
            .with_role("page-editor", [edit_type_content("Page")])
            .with_role("article-editor", [edit_type_content("Article")])
    }

    #[tokio::test]
    async fn admin_is_allowed_everything() {
        let user = CurrentUser::new("root").with_role("administrator");
        assert!(
            authorizer()
                .authorize(&user, "delete everything", None)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn edit_content_grants_any_item() {
        let user = CurrentUser::new("ed").with_role("editor");
        let item = ContentManager.new_item("Article");
        assert!(
            authorizer()
                .authorize(&user, EDIT_CONTENT, Some(&item))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn edit_own_content_requires_ownership() {
        let user = CurrentUser::new("alice").with_role("author");
        let mut item = ContentManager.new_item("Article");

        assert!(
            !authorizer()
                .authorize(&user, EDIT_CONTENT, Some(&item))
                .await
                .unwrap()
        );

        item.owner = Some("alice".to_string());
        assert!(
            authorizer()
                .authorize(&user, EDIT_CONTENT, Some(&item))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn type_scoped_permission() {
        let user = CurrentUser::new("pat").with_role("page-editor");
        let page = ContentManager.new_item("Page");
        let article = ContentManager.new_item("Article");

        let auth = authorizer();
        assert!(auth.authorize(&user, EDIT_CONTENT, Some(&page)).await.unwrap());
        assert!(!auth.authorize(&user, EDIT_CONTENT, Some(&article)).await.unwrap());
        assert!(!auth.authorize(&user, EDIT_CONTENT, None).await.unwrap());
    }

    #[tokio::test]
    async fn type_scoped_permission_requires_securable_type() {
        let user = CurrentUser::new("art").with_role("article-editor");
        let article = ContentManager.new_item("Article");
        assert!(
            !authorizer()
                .authorize(&user, EDIT_CONTENT, Some(&article))
                .await
                .unwrap()
        );

        // Without content types nothing is securable.
        let bare =
            PermissionAuthorizer::new().with_role("page-editor", [edit_type_content("Page")]);
        let user = CurrentUser::new("pat").with_role("page-editor");
        let page = ContentManager.new_item("Page");
        assert!(!bare.authorize(&user, EDIT_CONTENT, Some(&page)).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_roles_hold_nothing() {
        let user = CurrentUser::new("ghost").with_role("nonexistent");
        let item = ContentManager.new_item("Page");
        assert!(
            !authorizer()
                .authorize(&user, EDIT_CONTENT, Some(&item))
                .await
                .unwrap()
        );
    }
}
