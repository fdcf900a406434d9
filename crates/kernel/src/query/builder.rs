//! Content item query builder using SeaQuery.
//!
//! Renders a [`ContentItemQuery`] to a Postgres SELECT over the
//! `content_item_index` table.

use sea_query::{Alias, Expr, Order, PostgresQueryBuilder, Query, SimpleExpr};

use super::types::{ContentItemQuery, IndexColumn, ItemPredicate, SortDirection};

/// Default index table name.
pub const CONTENT_ITEM_INDEX_TABLE: &str = "content_item_index";

/// Columns selected for every row, in `ContentItem` field order.
const SELECT_COLUMNS: [&str; 11] = [
    "content_item_id",
    "content_item_version_id",
    "content_type",
    "display_text",
    "published",
    "latest",
    "owner",
    "author",
    "created_utc",
    "modified_utc",
    "published_utc",
];

/// Query builder for content item queries.
pub struct ItemQueryBuilder<'a> {
    query: &'a ContentItemQuery,
}

impl<'a> ItemQueryBuilder<'a> {
    pub fn new(query: &'a ContentItemQuery) -> Self {
        Self { query }
    }

    /// Build the SELECT statement.
    pub fn build(&self) -> String {
        let mut select = Query::select();

        for column in SELECT_COLUMNS {
            select.column((Alias::new(CONTENT_ITEM_INDEX_TABLE), Alias::new(column)));
        }
        select.from(Alias::new(CONTENT_ITEM_INDEX_TABLE));

        for predicate in self.query.predicates() {
            if let Some(condition) = self.predicate_expr(predicate) {
                select.and_where(condition);
            }
        }

        if let Some(order) = self.query.order() {
            let direction = match order.direction {
                SortDirection::Ascending => Order::Asc,
                SortDirection::Descending => Order::Desc,
            };
            select.order_by(
                (Alias::new(CONTENT_ITEM_INDEX_TABLE), Alias::new(order.column.as_str())),
                direction,
            );
        }

        select.to_string(PostgresQueryBuilder)
    }

    fn col(&self, column: IndexColumn) -> Expr {
        Expr::col((Alias::new(CONTENT_ITEM_INDEX_TABLE), Alias::new(column.as_str())))
    }

    /// Build a single WHERE condition.
    fn predicate_expr(&self, predicate: &ItemPredicate) -> Option<SimpleExpr> {
        match predicate {
            ItemPredicate::ContentTypeIs(name) => {
                Some(self.col(IndexColumn::ContentType).eq(name.as_str()))
            }
            ItemPredicate::ContentTypeIn(names) => {
                // An empty IN list would match nothing; callers skip it instead.
                if names.is_empty() {
                    return None;
                }
                Some(
                    self.col(IndexColumn::ContentType)
                        .is_in(names.iter().map(String::as_str)),
                )
            }
            ItemPredicate::Published => Some(self.col(IndexColumn::Published).eq(true)),
            ItemPredicate::Latest => Some(self.col(IndexColumn::Latest).eq(true)),
            ItemPredicate::LatestDraft => Some(
                self.col(IndexColumn::Latest)
                    .eq(true)
                    .and(self.col(IndexColumn::Published).eq(false)),
            ),
            ItemPredicate::OwnerIs(Some(owner)) => {
                Some(self.col(IndexColumn::Owner).eq(owner.as_str()))
            }
            ItemPredicate::OwnerIs(None) => Some(self.col(IndexColumn::Owner).is_null()),
        }
    }
}
