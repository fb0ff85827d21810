//! Item service - business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use database::{Page, PageRequest, Sort};

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, NewItem};
use crate::repository::ItemRepository;

/// Item service providing validation and orchestration on top of a
/// repository.
///
/// Input validation happens here, before any store call is attempted;
/// malformed input never reaches the repository.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new item
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: NewItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.repository.save(Item::new(input)).await
    }

    /// Save an item: insert when transient, upsert otherwise
    #[instrument(skip(self, item), fields(item_id = item.id))]
    pub async fn save_item(&self, item: Item) -> ItemResult<Item> {
        item.validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.repository.save(item).await
    }

    /// Save a batch of items atomically
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn save_items(&self, items: Vec<Item>) -> ItemResult<Vec<Item>> {
        for item in &items {
            item.validate()
                .map_err(|e| ItemError::Validation(e.to_string()))?;
        }

        self.repository.save_all(items).await
    }

    /// Get an item by id, failing with NotFound when absent
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i32) -> ItemResult<Item> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// Find an item by id; `None` when absent
    pub async fn find_item(&self, id: i32) -> ItemResult<Option<Item>> {
        self.repository.find_by_id(id).await
    }

    /// Whether an item with this id exists
    pub async fn item_exists(&self, id: i32) -> ItemResult<bool> {
        self.repository.exists_by_id(id).await
    }

    /// List all items
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.find_all().await
    }

    /// List all items with ordering
    pub async fn list_items_sorted(&self, sort: &Sort) -> ItemResult<Vec<Item>> {
        self.repository.find_all_sorted(sort).await
    }

    /// Fetch one page of items
    pub async fn list_items_paged(&self, request: &PageRequest) -> ItemResult<Page<Item>> {
        self.repository.find_all_paged(request).await
    }

    /// Fetch the items with the given ids; missing ids are skipped
    pub async fn find_items(&self, ids: Vec<i32>) -> ItemResult<Vec<Item>> {
        self.repository.find_all_by_id(ids).await
    }

    /// Count all items
    pub async fn count_items(&self) -> ItemResult<u64> {
        self.repository.count().await
    }

    /// Delete an item by id. Deleting an id that does not exist is a no-op,
    /// mirroring the repository's idempotent delete.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i32) -> ItemResult<()> {
        self.repository.delete_by_id(id).await
    }

    /// Delete a batch of items atomically
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn delete_items(&self, items: Vec<Item>) -> ItemResult<()> {
        self.repository.delete_all_batch(items).await
    }

    /// Delete every item
    #[instrument(skip(self))]
    pub async fn clear_items(&self) -> ItemResult<()> {
        self.repository.delete_all().await
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockItemRepository;

    fn new_item(name: &str) -> NewItem {
        NewItem {
            name: name.to_string(),
            category: "hardware".to_string(),
            stock: 5,
            price: 1.25,
        }
    }

    #[tokio::test]
    async fn test_create_item_rejects_empty_name_before_repository() {
        // no expectations set: any repository call would panic the test
        let mock_repo = MockItemRepository::new();
        let service = ItemService::new(mock_repo);

        let result = service
            .create_item(NewItem {
                name: String::new(),
                category: "hardware".to_string(),
                stock: 1,
                price: 1.0,
            })
            .await;

        assert!(matches!(result, Err(ItemError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_item_rejects_negative_stock() {
        let mock_repo = MockItemRepository::new();
        let service = ItemService::new(mock_repo);

        let result = service
            .create_item(NewItem {
                name: "bolt".to_string(),
                category: "hardware".to_string(),
                stock: -3,
                price: 1.0,
            })
            .await;

        assert!(matches!(result, Err(ItemError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_item_saves_a_transient_item() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_save()
            .withf(|item| item.is_transient() && item.name == "widget")
            .returning(|mut item| {
                item.id = 1;
                Ok(item)
            });

        let service = ItemService::new(mock_repo);
        let created = service.create_item(new_item("widget")).await.unwrap();

        assert_eq!(created.id, 1);
        assert!(!created.is_transient());
    }

    #[tokio::test]
    async fn test_save_items_validates_every_item() {
        let mock_repo = MockItemRepository::new();
        let service = ItemService::new(mock_repo);

        let mut bad = Item::new(new_item("bolt"));
        bad.price = -1.0;

        let result = service
            .save_items(vec![Item::new(new_item("nut")), bad])
            .await;

        assert!(matches!(result, Err(ItemError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_item_maps_absent_row_to_not_found() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(mockall::predicate::eq(99))
            .returning(|_| Ok(None));

        let service = ItemService::new(mock_repo);
        let result = service.get_item(99).await;

        assert!(matches!(result, Err(ItemError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_delete_item_is_idempotent() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_delete_by_id().times(2).returning(|_| Ok(()));

        let service = ItemService::new(mock_repo);
        service.delete_item(5).await.unwrap();
        service.delete_item(5).await.unwrap();
    }
}
