//! Typed content item queries and the common admin filter parameters.
//!
//! A [`ContentItemQuery`] is a list of predicates over the content item
//! index plus an optional ordering. Sessions either render it to SQL or
//! evaluate it in memory.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::content::ContentItem;

/// Publication status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ContentsStatusFilter {
    Published,
    Draft,
    #[default]
    AllVersions,
}

impl From<String> for ContentsStatusFilter {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "published" => Self::Published,
            "draft" => Self::Draft,
            _ => Self::AllVersions,
        }
    }
}

/// Sort key offered by the admin listing.
///
/// `Title` is listed by the admin UI but sorts like the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ContentsOrder {
    #[default]
    Modified,
    Published,
    Created,
    Title,
}

impl From<String> for ContentsOrder {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "published" => Self::Published,
            "created" => Self::Created,
            "title" => Self::Title,
            _ => Self::Modified,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl From<String> for SortDirection {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Self::Ascending,
            _ => Self::Descending,
        }
    }
}

/// Filters shared by every tree provider's item listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommonContentTreeParams {
    pub content_status_filter: ContentsStatusFilter,
    pub owned_by_me: bool,
    pub sort_by: ContentsOrder,
    pub sort_direction: SortDirection,
}

/// Columns of the content item index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexColumn {
    ContentType,
    Published,
    Latest,
    Owner,
    ModifiedUtc,
    PublishedUtc,
    CreatedUtc,
}

impl IndexColumn {
    /// Column name in the `content_item_index` table.
    pub fn as_str(self) -> &'static str {
        match self {
            IndexColumn::ContentType => "content_type",
            IndexColumn::Published => "published",
            IndexColumn::Latest => "latest",
            IndexColumn::Owner => "owner",
            IndexColumn::ModifiedUtc => "modified_utc",
            IndexColumn::PublishedUtc => "published_utc",
            IndexColumn::CreatedUtc => "created_utc",
        }
    }
}

/// A condition over the content item index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPredicate {
    /// `content_type = name`
    ContentTypeIs(String),
    /// `content_type IN (names)`
    ContentTypeIn(Vec<String>),
    /// `published`
    Published,
    /// `latest`
    Latest,
    /// `latest AND NOT published`
    LatestDraft,
    /// `owner = name`, or `owner IS NULL` when no name is given.
    OwnerIs(Option<String>),
}

impl ItemPredicate {
    /// Evaluate the predicate against an item.
    pub fn matches(&self, item: &ContentItem) -> bool {
        match self {
            ItemPredicate::ContentTypeIs(name) => item.content_type == *name,
            ItemPredicate::ContentTypeIn(names) => names.contains(&item.content_type),
            ItemPredicate::Published => item.published,
            ItemPredicate::Latest => item.latest,
            ItemPredicate::LatestDraft => item.is_draft(),
            ItemPredicate::OwnerIs(owner) => item.owner == *owner,
        }
    }
}

/// Ordering applied to query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemOrder {
    pub column: IndexColumn,
    pub direction: SortDirection,
}

impl ItemOrder {
    /// Compare two items by this ordering.
    ///
    /// Missing timestamps sort after present ones ascending and before them
    /// descending, as Postgres orders NULLs by default.
    pub fn compare(&self, a: &ContentItem, b: &ContentItem) -> Ordering {
        let key = |item: &ContentItem| match self.column {
            IndexColumn::PublishedUtc => item.published_utc,
            IndexColumn::CreatedUtc => item.created_utc,
            _ => item.modified_utc,
        };

        let ascending = match (key(a), key(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => x.cmp(&y),
        };

        match self.direction {
            SortDirection::Ascending => ascending,
            SortDirection::Descending => ascending.reverse(),
        }
    }
}

/// A query against the content item index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentItemQuery {
    predicates: Vec<ItemPredicate>,
    order: Option<ItemOrder>,
}

impl ContentItemQuery {
    /// An unrestricted, unordered query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate; predicates are combined with AND.
    pub fn with(mut self, predicate: ItemPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Order ascending by a column, replacing any previous ordering.
    pub fn order_by(mut self, column: IndexColumn) -> Self {
        self.order = Some(ItemOrder {
            column,
            direction: SortDirection::Ascending,
        });
        self
    }

    /// Order descending by a column, replacing any previous ordering.
    pub fn order_by_descending(mut self, column: IndexColumn) -> Self {
        self.order = Some(ItemOrder {
            column,
            direction: SortDirection::Descending,
        });
        self
    }

    pub fn predicates(&self) -> &[ItemPredicate] {
        &self.predicates
    }

    pub fn order(&self) -> Option<ItemOrder> {
        self.order
    }

    /// Check an item against every predicate.
    pub fn matches(&self, item: &ContentItem) -> bool {
        self.predicates.iter().all(|p| p.matches(item))
    }
}
