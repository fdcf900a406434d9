//! Per-request context.
//!
//! Carries the current user explicitly into every tree operation instead of
//! reading it from an ambient accessor.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated user behind a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Stable user ID.
    pub id: Uuid,
    /// User name; content item ownership is recorded by name.
    pub name: String,
    /// Roles assigned to the user.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl CurrentUser {
    /// Create a user with no roles.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            roles: Vec::new(),
        }
    }

    /// Add a role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }
}

/// State for a single tree request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Authenticated user, if any.
    pub user: Option<CurrentUser>,
}

impl RequestContext {
    /// Context for an unauthenticated request.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// Context for an authenticated user.
    pub fn for_user(user: CurrentUser) -> Self {
        Self { user: Some(user) }
    }

    /// Name of the current user, if any.
    pub fn user_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_context_has_no_user() {
        let ctx = RequestContext::anonymous();
        assert!(ctx.user.is_none());
        assert_eq!(ctx.user_name(), None);
    }

    #[test]
    fn user_context_exposes_name_and_roles() {
        let user = CurrentUser::new("alice").with_role("editor");
        let ctx = RequestContext::for_user(user);

        assert_eq!(ctx.user_name(), Some("alice"));
        assert_eq!(ctx.user.as_ref().unwrap().roles, vec!["editor"]);
    }
}
