//! HTTP route handlers.

pub mod content_tree;
pub mod health;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(content_tree::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
