//! Content item sessions: where queries are executed.

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::PgPool;
use tracing::debug;

use super::builder::ItemQueryBuilder;
use super::types::ContentItemQuery;
use crate::content::ContentItem;

/// Executes content item queries against an index.
#[async_trait]
pub trait ContentItemSession: Send + Sync {
    /// Start a new, unrestricted query.
    fn query(&self) -> ContentItemQuery {
        ContentItemQuery::new()
    }

    /// Execute a query and return every match.
    async fn list(&self, query: &ContentItemQuery) -> Result<Vec<ContentItem>>;
}

/// Session backed by the Postgres `content_item_index` table.
#[derive(Clone)]
pub struct PgContentItemSession {
    pool: PgPool,
}

impl PgContentItemSession {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentItemSession for PgContentItemSession {
    async fn list(&self, query: &ContentItemQuery) -> Result<Vec<ContentItem>> {
        let sql = ItemQueryBuilder::new(query).build();
        debug!(%sql, "listing content items");

        let items = sqlx::query_as::<_, ContentItem>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to list content items")?;

        Ok(items)
    }
}

/// Session over an in-memory list of items.
#[derive(Debug, Default)]
pub struct MemoryContentItemSession {
    items: RwLock<Vec<ContentItem>>,
}

impl MemoryContentItemSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = ContentItem>) -> Self {
        Self {
            items: RwLock::new(items.into_iter().collect()),
        }
    }

    pub fn insert(&self, item: ContentItem) {
        self.items.write().push(item);
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait]
impl ContentItemSession for MemoryContentItemSession {
    async fn list(&self, query: &ContentItemQuery) -> Result<Vec<ContentItem>> {
        let mut matches: Vec<ContentItem> = self
            .items
            .read()
            .iter()
            .filter(|item| query.matches(item))
            .cloned()
            .collect();

        if let Some(order) = query.order() {
            matches.sort_by(|a, b| order.compare(a, b));
        }

        Ok(matches)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::ContentManager;
    use crate::query::types::{IndexColumn, ItemPredicate};
    use chrono::{Duration, TimeZone, Utc};

    fn item(content_type: &str, published: bool, day: i64) -> ContentItem {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut item = ContentManager.new_item(content_type);
        item.published = published;
        item.modified_utc = Some(base + Duration::days(day));
        item
    }

    #[tokio::test]
    async fn memory_session_filters_and_sorts() {
        let session = MemoryContentItemSession::with_items([
            item("Page", true, 2),
            item("Article", true, 5),
            item("Page", false, 9),
            item("Page", true, 1),
        ]);

        let query = session
            .query()
            .with(ItemPredicate::ContentTypeIs("Page".into()))
            .with(ItemPredicate::Published)
            .order_by(IndexColumn::ModifiedUtc);
        let items = session.list(&query).await.unwrap();

        assert_eq!(items.len(), 2);
        assert!(items[0].modified_utc < items[1].modified_utc);
        assert!(items.iter().all(|i| i.content_type == "Page" && i.published));
    }

    #[tokio::test]
    async fn memory_session_without_order_keeps_insertion_order() {
        let first = item("Page", true, 3);
        let second = item("Page", true, 1);
        let session = MemoryContentItemSession::with_items([first.clone(), second.clone()]);

        let items = session.list(&ContentItemQuery::new()).await.unwrap();
        assert_eq!(items, vec![first, second]);
    }

    #[test]
    fn memory_session_insert() {
        let session = MemoryContentItemSession::new();
        assert!(session.is_empty());
        session.insert(item("Page", false, 0));
        assert_eq!(session.len(), 1);
    }
}
