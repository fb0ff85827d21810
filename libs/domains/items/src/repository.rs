use async_trait::async_trait;
use database::{Page, PageRequest, Sort};

use crate::error::ItemResult;
use crate::models::Item;

/// Repository trait for Item persistence
///
/// The closed set of operations callers may rely on, independent of the
/// storage backend. Reads that find nothing return empty values, never an
/// error; errors are reserved for validation, conflicts and connectivity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a transient item or upsert a persisted one; returns the item
    /// as stored, with its assigned id
    async fn save(&self, item: Item) -> ItemResult<Item>;

    /// Batch save in one transaction; result order matches input order
    async fn save_all(&self, items: Vec<Item>) -> ItemResult<Vec<Item>>;

    /// Get an item by id; `None` when absent
    async fn find_by_id(&self, id: i32) -> ItemResult<Option<Item>>;

    /// Whether an item with this id exists
    async fn exists_by_id(&self, id: i32) -> ItemResult<bool>;

    /// All items, in store order
    async fn find_all(&self) -> ItemResult<Vec<Item>>;

    /// All items ordered by the given sort keys, applied in listed order
    async fn find_all_sorted(&self, sort: &Sort) -> ItemResult<Vec<Item>>;

    /// One page of items with store-computed totals
    async fn find_all_paged(&self, request: &PageRequest) -> ItemResult<Page<Item>>;

    /// The items whose ids are in `ids`; missing ids are skipped
    async fn find_all_by_id(&self, ids: Vec<i32>) -> ItemResult<Vec<Item>>;

    /// Total number of items
    async fn count(&self) -> ItemResult<u64>;

    /// Delete by id; a missing id is a no-op
    async fn delete_by_id(&self, id: i32) -> ItemResult<()>;

    /// Delete by the item's id, with the same idempotence as `delete_by_id`
    async fn delete(&self, item: Item) -> ItemResult<()>;

    /// Delete every item
    async fn delete_all(&self) -> ItemResult<()>;

    /// Delete the given items in one transaction
    async fn delete_all_batch(&self, items: Vec<Item>) -> ItemResult<()>;
}
