//! Tree node provider trait and the registry that addresses providers by id.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{info, warn};

use super::node::TreeNode;
use crate::content::ContentItem;
use crate::error::TreeResult;
use crate::query::CommonContentTreeParams;
use crate::request::RequestContext;

/// Supplies one branch of the admin content tree.
#[async_trait]
pub trait TreeNodeProvider: Send + Sync {
    /// Stable provider id, used to route item listings back to this provider.
    fn id(&self) -> &str;

    /// Display name of the provider's top-level node.
    fn name(&self) -> &str;

    /// Child nodes of `(node_type, node_id)`.
    fn get_children(&self, node_type: &str, node_id: &str) -> Vec<TreeNode>;

    /// Look up a single node.
    fn get(&self, node_type: &str, node_id: &str) -> TreeResult<TreeNode>;

    /// Content items behind a leaf node.
    async fn get_content_items(
        &self,
        ctx: &RequestContext,
        specific_params: Option<&HashMap<String, String>>,
        common_params: Option<&CommonContentTreeParams>,
    ) -> TreeResult<Vec<ContentItem>>;
}

/// Registry of tree node providers keyed by id.
#[derive(Clone, Default)]
pub struct TreeProviderRegistry {
    providers: Arc<DashMap<String, Arc<dyn TreeNodeProvider>>>,
}

impl TreeProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any provider with the same id.
    pub fn register(&self, provider: Arc<dyn TreeNodeProvider>) {
        let id = provider.id().to_string();
        if self.providers.insert(id.clone(), provider).is_some() {
            warn!(provider = %id, "replaced tree node provider");
        } else {
            info!(provider = %id, "registered tree node provider");
        }
    }

    /// Get a provider by id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn TreeNodeProvider>> {
        self.providers.get(id).map(|r| Arc::clone(r.value()))
    }

    /// Registered provider ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.providers.iter().map(|r| r.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
