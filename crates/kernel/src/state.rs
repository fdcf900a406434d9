//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::content::ContentTypeRegistry;
use crate::db;
use crate::permissions::{
    ADMINISTER_SITE, EDIT_CONTENT, EDIT_OWN_CONTENT, PermissionAuthorizer,
};
use crate::query::PgContentItemSession;
use crate::tree::{AdminUrlHelper, ContentTreeNodeProvider, StaticLocalizer, TreeProviderRegistry};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool; absent when embedded without a database.
    db: Option<PgPool>,

    /// Content type definitions.
    content_types: ContentTypeRegistry,

    /// Tree providers addressed by id.
    providers: TreeProviderRegistry,
}

impl AppState {
    /// Create application state: database pool, migrations, content types
    /// and the content tree provider.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::create_pool(config)
            .await
            .context("failed to create database pool")?;

        db::run_migrations(&db)
            .await
            .context("failed to run migrations")?;

        let content_types = ContentTypeRegistry::new();
        if config.content_types_file.exists() {
            content_types
                .load_file(&config.content_types_file)
                .context("failed to load content types")?;
        } else {
            info!(
                path = %config.content_types_file.display(),
                "content types file not found; starting with no content types"
            );
        }

        let provider = ContentTreeNodeProvider::new(
            content_types.clone(),
            Arc::new(PgContentItemSession::new(db.clone())),
            Arc::new(default_authorizer(&content_types)),
            Arc::new(AdminUrlHelper::new(config.admin_base_path.clone())),
            &StaticLocalizer::new(),
        );

        let providers = TreeProviderRegistry::new();
        providers.register(Arc::new(provider));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                db: Some(db),
                content_types,
                providers,
            }),
        })
    }

    /// Create state from prebuilt parts, without a database.
    pub fn from_parts(content_types: ContentTypeRegistry, providers: TreeProviderRegistry) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db: None,
                content_types,
                providers,
            }),
        }
    }

    /// Get the database pool, if connected.
    pub fn db(&self) -> Option<&PgPool> {
        self.inner.db.as_ref()
    }

    /// Get the content type registry.
    pub fn content_types(&self) -> &ContentTypeRegistry {
        &self.inner.content_types
    }

    /// Get the tree provider registry.
    pub fn providers(&self) -> &TreeProviderRegistry {
        &self.inner.providers
    }

    /// Check if PostgreSQL is healthy.
    pub async fn postgres_healthy(&self) -> bool {
        match self.db() {
            Some(pool) => db::check_health(pool).await,
            None => false,
        }
    }
}

/// Built-in roles (administrators, editors, authors of their own content)
/// over the given content types.
pub fn default_authorizer(content_types: &ContentTypeRegistry) -> PermissionAuthorizer {
    PermissionAuthorizer::new()
        .with_content_types(content_types.clone())
        .with_role("administrator", [ADMINISTER_SITE])
        .with_role("editor", [EDIT_CONTENT])
        .with_role("author", [EDIT_OWN_CONTENT])
}
