//! Admin routes for the content tree.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::content::ContentItem;
use crate::error::{AppError, AppResult};
use crate::query::CommonContentTreeParams;
use crate::request::{CurrentUser, RequestContext};
use crate::state::AppState;
use crate::tree::TreeNode;

/// Header carrying the authenticated user name, set by the auth proxy.
pub const USER_HEADER: &str = "x-canopy-user";

/// Header carrying the user's comma-separated roles.
pub const ROLES_HEADER: &str = "x-canopy-roles";

/// Non-empty, trimmed header value.
fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(name) = header_value(parts, USER_HEADER) else {
            return Ok(RequestContext::anonymous());
        };

        let mut user = CurrentUser::new(name);
        if let Some(roles) = header_value(parts, ROLES_HEADER) {
            user.roles = roles
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(RequestContext::for_user(user))
    }
}

/// Node address in query string form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeQuery {
    node_type: String,
    #[serde(default)]
    node_id: String,
}

/// Child nodes of a tree node.
///
/// GET /admin/content-tree/{provider_id}/children?nodeType=..&nodeId=..
async fn children(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    Query(node): Query<NodeQuery>,
) -> AppResult<Json<Vec<TreeNode>>> {
    let provider = state
        .providers()
        .get(&provider_id)
        .ok_or(AppError::NotFound)?;

    Ok(Json(provider.get_children(&node.node_type, &node.node_id)))
}

/// A single tree node.
///
/// GET /admin/content-tree/{provider_id}/node?nodeType=..&nodeId=..
async fn node(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    Query(node): Query<NodeQuery>,
) -> AppResult<Json<TreeNode>> {
    let provider = state
        .providers()
        .get(&provider_id)
        .ok_or(AppError::NotFound)?;

    Ok(Json(provider.get(&node.node_type, &node.node_id)?))
}

/// Extract `providerParams[key]=value` pairs.
fn provider_params(raw: &HashMap<String, String>) -> HashMap<String, String> {
    raw.iter()
        .filter_map(|(k, v)| {
            let key = k.strip_prefix("providerParams[")?.strip_suffix(']')?;
            Some((key.to_string(), v.clone()))
        })
        .collect()
}

/// Content items listed by a provider.
///
/// GET /admin/content-tree/items?providerId=..&providerParams[typename]=..
async fn items(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(raw): Query<HashMap<String, String>>,
    Query(common): Query<CommonContentTreeParams>,
) -> AppResult<Json<Vec<ContentItem>>> {
    let provider_id = raw
        .get("providerId")
        .ok_or_else(|| AppError::BadRequest("providerId is required".to_string()))?;

    let provider = state
        .providers()
        .get(provider_id)
        .ok_or(AppError::NotFound)?;

    let specific = provider_params(&raw);
    let items = provider
        .get_content_items(&ctx, Some(&specific), Some(&common))
        .await?;

    tracing::debug!(provider = %provider_id, count = items.len(), "listed content items");
    Ok(Json(items))
}

/// Create the content tree router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/content-tree/items", get(items))
        .route("/admin/content-tree/{provider_id}/children", get(children))
        .route("/admin/content-tree/{provider_id}/node", get(node))
}
