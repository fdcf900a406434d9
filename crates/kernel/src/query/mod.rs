//! Content item query layer.
//!
//! This module provides:
//! - ContentItemQuery: typed predicates and ordering over the item index
//! - CommonContentTreeParams: status, ownership and sort filters
//! - ItemQueryBuilder: SeaQuery-based SQL generation
//! - ContentItemSession: query execution (Postgres or in-memory)

mod builder;
mod session;
pub mod types;

pub use builder::{CONTENT_ITEM_INDEX_TABLE, ItemQueryBuilder};
pub use session::{ContentItemSession, MemoryContentItemSession, PgContentItemSession};
pub use types::{
    CommonContentTreeParams, ContentItemQuery, ContentsOrder, ContentsStatusFilter, IndexColumn,
    ItemOrder, ItemPredicate, SortDirection,
};
