#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Builds the real content tree provider and router over an in-memory
//! content item session, seeded from `canopy-test-utils` fixtures.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use canopy_kernel::content::{ContentItem, ContentTypeRegistry};
use canopy_kernel::permissions::{AuthorizationService, PermissionAuthorizer};
use canopy_kernel::query::MemoryContentItemSession;
use canopy_kernel::request::{CurrentUser, RequestContext};
use canopy_kernel::routes;
use canopy_kernel::routes::content_tree::{ROLES_HEADER, USER_HEADER};
use canopy_kernel::state::{AppState, default_authorizer};
use canopy_kernel::tree::{
    AdminUrlHelper, ContentTreeNodeProvider, StaticLocalizer, TreeProviderRegistry,
};
use canopy_test_utils::{TestItem, TestUser};

/// Convert a fixture into a kernel content item.
pub fn item(fixture: &TestItem) -> ContentItem {
    serde_json::from_value(fixture.to_json()).expect("fixture must deserialize")
}

/// Request context for a fixture user.
pub fn ctx(user: &TestUser) -> RequestContext {
    RequestContext::for_user(serde_json::from_value::<CurrentUser>(user.to_json()).unwrap())
}

/// Registry loaded from a YAML fixture.
pub fn registry(yaml: &str) -> ContentTypeRegistry {
    let registry = ContentTypeRegistry::new();
    registry.load_yaml(yaml).unwrap();
    registry
}

/// Provider wiring used by most tests.
pub struct TestTree {
    pub provider: Arc<ContentTreeNodeProvider>,
    pub session: Arc<MemoryContentItemSession>,
    pub registry: ContentTypeRegistry,
}

impl TestTree {
    /// Build a tree over `yaml` types and `items`, with the default roles.
    pub fn new(yaml: &str, items: &[TestItem]) -> Self {
        let authorizer = default_authorizer(&registry(yaml));
        Self::with_authorizer(yaml, items, Arc::new(authorizer))
    }

    pub fn with_authorizer(
        yaml: &str,
        items: &[TestItem],
        authorizer: Arc<dyn AuthorizationService>,
    ) -> Self {
        let registry = registry(yaml);
        let session = Arc::new(MemoryContentItemSession::with_items(
            items.iter().map(item),
        ));
        let provider = Arc::new(ContentTreeNodeProvider::new(
            registry.clone(),
            session.clone(),
            authorizer,
            Arc::new(AdminUrlHelper::default()),
            &StaticLocalizer::new(),
        ));

        Self {
            provider,
            session,
            registry,
        }
    }

    /// Router serving this tree.
    pub fn router(&self) -> Router {
        let providers = TreeProviderRegistry::new();
        providers.register(self.provider.clone());
        routes::app(AppState::from_parts(self.registry.clone(), providers))
    }
}

/// An authorizer that grants nothing.
pub fn deny_all() -> Arc<dyn AuthorizationService> {
    Arc::new(PermissionAuthorizer::new())
}

/// Send a GET request, optionally as a user, and return status plus JSON body.
pub async fn get_json(
    router: &Router,
    uri: &str,
    user: Option<&TestUser>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(user) = user {
        builder = builder
            .header(USER_HEADER, &user.name)
            .header(ROLES_HEADER, user.roles_header());
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()));

    (status, body)
}
