//! Content type tree provider.
//!
//! The root has a single "content types" node; below it sits one leaf per
//! creatable content type, linking to the item listing for that type.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::node::TreeNode;
use super::provider::TreeNodeProvider;
use super::url::{Localizer, UrlHelper};
use crate::content::{ContentItem, ContentManager, ContentTypeDefinition, ContentTypeRegistry};
use crate::error::{TreeError, TreeResult};
use crate::permissions::{AuthorizationService, EDIT_CONTENT};
use crate::query::{
    CommonContentTreeParams, ContentItemQuery, ContentItemSession, ContentsOrder,
    ContentsStatusFilter, IndexColumn, ItemPredicate, SortDirection,
};
use crate::request::RequestContext;

/// Node type of the tree root.
pub const ROOT_NODE_TYPE: &str = "root";

/// Node type whose children are the creatable content types.
pub const CONTENT_TYPES_NODE_TYPE: &str = "content-types";

/// Node type of a single content type leaf.
pub const CONTENT_TYPE_NODE_TYPE: &str = "content-type";

/// Key of the content type name in provider-specific parameters.
pub const TYPENAME_PARAM: &str = "typename";

/// Area, controller and action of the item listing.
pub const ITEMS_AREA: &str = "content-tree";
pub const ITEMS_CONTROLLER: &str = "admin";
pub const ITEMS_ACTION: &str = "items";

/// Tree provider over the content type registry.
pub struct ContentTreeNodeProvider {
    registry: ContentTypeRegistry,
    session: Arc<dyn ContentItemSession>,
    authorizer: Arc<dyn AuthorizationService>,
    url_helper: Arc<dyn UrlHelper>,
    content_manager: ContentManager,
    name: String,
    id: String,
}

impl ContentTreeNodeProvider {
    pub fn new(
        registry: ContentTypeRegistry,
        session: Arc<dyn ContentItemSession>,
        authorizer: Arc<dyn AuthorizationService>,
        url_helper: Arc<dyn UrlHelper>,
        localizer: &dyn Localizer,
    ) -> Self {
        Self {
            registry,
            session,
            authorizer,
            url_helper,
            content_manager: ContentManager,
            name: localizer.get("Content Types"),
            id: localizer.get("content-types"),
        }
    }

    fn content_types_node(&self) -> TreeNode {
        TreeNode {
            title: self.name.clone(),
            node_type: self.id.clone(),
            id: self.id.clone(),
            is_leaf: false,
            url: None,
        }
    }

    fn content_type_node(&self, definition: &ContentTypeDefinition) -> TreeNode {
        let url = self.url_helper.action(
            ITEMS_ACTION,
            ITEMS_CONTROLLER,
            &[
                ("area", ITEMS_AREA),
                ("controller", ITEMS_CONTROLLER),
                ("action", ITEMS_ACTION),
                ("providerId", self.id.as_str()),
                ("providerParams[typename]", definition.name.as_str()),
            ],
        );

        TreeNode {
            title: definition.display_name.clone(),
            node_type: CONTENT_TYPE_NODE_TYPE.to_string(),
            id: definition.name.clone(),
            is_leaf: true,
            url: Some(url),
        }
    }

    /// Listable content types the current user may edit.
    ///
    /// Empty without a user. Order follows the registry.
    pub async fn listable_types(
        &self,
        ctx: &RequestContext,
    ) -> TreeResult<Vec<ContentTypeDefinition>> {
        let Some(user) = ctx.user.as_ref() else {
            return Ok(Vec::new());
        };

        let mut listable = Vec::new();
        for definition in self.registry.list() {
            if !definition.settings.listable {
                continue;
            }

            let resource = self.content_manager.new_item(&definition.name);
            let authorized = self
                .authorizer
                .authorize(user, EDIT_CONTENT, Some(&resource))
                .await
                .map_err(TreeError::Authorization)?;

            if authorized {
                listable.push(definition);
            }
        }

        Ok(listable)
    }

    /// Apply status, ownership and sort filters, in that order.
    pub fn apply_common_params(
        &self,
        query: Option<ContentItemQuery>,
        common_params: Option<&CommonContentTreeParams>,
        ctx: &RequestContext,
    ) -> TreeResult<ContentItemQuery> {
        let query = query.ok_or(TreeError::NullArgument("query"))?;

        let Some(params) = common_params else {
            return Ok(query);
        };

        let mut query = match params.content_status_filter {
            ContentsStatusFilter::Published => query.with(ItemPredicate::Published),
            ContentsStatusFilter::Draft => query.with(ItemPredicate::LatestDraft),
            ContentsStatusFilter::AllVersions => query.with(ItemPredicate::Latest),
        };

        if params.owned_by_me {
            let owner = ctx.user_name().map(str::to_string);
            query = query.with(ItemPredicate::OwnerIs(owner));
        }

        let column = match params.sort_by {
            ContentsOrder::Published => IndexColumn::PublishedUtc,
            ContentsOrder::Created => IndexColumn::CreatedUtc,
            ContentsOrder::Modified | ContentsOrder::Title => IndexColumn::ModifiedUtc,
        };

        Ok(match params.sort_direction {
            SortDirection::Ascending => query.order_by(column),
            SortDirection::Descending => query.order_by_descending(column),
        })
    }
}

/// Case-insensitive display name order, ordinal on ties.
fn display_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[async_trait]
impl TreeNodeProvider for ContentTreeNodeProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_children(&self, node_type: &str, _node_id: &str) -> Vec<TreeNode> {
        if node_type == ROOT_NODE_TYPE {
            return vec![self.content_types_node()];
        }

        if node_type == CONTENT_TYPES_NODE_TYPE {
            let mut creatable: Vec<ContentTypeDefinition> = self
                .registry
                .list()
                .into_iter()
                .filter(|def| def.settings.creatable)
                .collect();
            creatable.sort_by(|a, b| display_order(&a.display_name, &b.display_name));

            return creatable
                .iter()
                .map(|def| self.content_type_node(def))
                .collect();
        }

        Vec::new()
    }

    fn get(&self, _node_type: &str, _node_id: &str) -> TreeResult<TreeNode> {
        Err(TreeError::NotImplemented(
            "get is not implemented: content tree node provider".to_string(),
        ))
    }

    async fn get_content_items(
        &self,
        ctx: &RequestContext,
        specific_params: Option<&HashMap<String, String>>,
        common_params: Option<&CommonContentTreeParams>,
    ) -> TreeResult<Vec<ContentItem>> {
        let mut query = self.session.query();

        if let Some(type_name) = specific_params.and_then(|p| p.get(TYPENAME_PARAM)) {
            if !self.registry.exists(type_name) {
                return Err(TreeError::InvalidArgument(format!(
                    "the content type {type_name} does not exist"
                )));
            }
            query = query.with(ItemPredicate::ContentTypeIs(type_name.clone()));
        } else {
            let listable: Vec<String> = self
                .listable_types(ctx)
                .await?
                .into_iter()
                .map(|def| def.name)
                .collect();

            if listable.is_empty() {
                debug!("no listable content types; item query is not restricted by type");
            } else {
                query = query.with(ItemPredicate::ContentTypeIn(listable));
            }
        }

        let query = self.apply_common_params(Some(query), common_params, ctx)?;

        self.session.list(&query).await.map_err(TreeError::Query)
    }
}
