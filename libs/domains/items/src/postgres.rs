use async_trait::async_trait;
use database::{BaseRepository, DatabaseError, Page, PageRequest, Sort};
use sea_orm::ActiveValue::Set;
use sea_orm::DatabaseConnection;

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::Item,
    repository::ItemRepository,
};

/// PostgreSQL implementation of ItemRepository on top of the generic
/// repository core.
#[derive(Clone)]
pub struct PgItemRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// The unique index on items.name reports under a constraint carrying the
/// column name
fn is_name_conflict(constraint: &str) -> bool {
    constraint.contains("name")
}

fn key_only(id: i32) -> entity::ActiveModel {
    entity::ActiveModel {
        id: Set(id),
        ..Default::default()
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn save(&self, item: Item) -> ItemResult<Item> {
        let name = item.name.clone();
        let model = self
            .base
            .save(entity::ActiveModel::from(item))
            .await
            .map_err(|e| match e {
                DatabaseError::Conflict(c) if is_name_conflict(&c) => {
                    ItemError::DuplicateName(name)
                }
                other => other.into(),
            })?;

        tracing::info!(item_id = model.id, "Saved item");
        Ok(model.into())
    }

    async fn save_all(&self, items: Vec<Item>) -> ItemResult<Vec<Item>> {
        let models = items.into_iter().map(entity::ActiveModel::from).collect();
        let saved = self.base.save_all(models).await?;

        tracing::info!(count = saved.len(), "Saved item batch");
        Ok(saved.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> ItemResult<Option<Item>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn exists_by_id(&self, id: i32) -> ItemResult<bool> {
        Ok(self.base.exists_by_id(id).await?)
    }

    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        Ok(self
            .base
            .find_all()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn find_all_sorted(&self, sort: &Sort) -> ItemResult<Vec<Item>> {
        Ok(self
            .base
            .find_all_sorted(sort)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn find_all_paged(&self, request: &PageRequest) -> ItemResult<Page<Item>> {
        Ok(self.base.find_all_paged(request).await?.map(Into::into))
    }

    async fn find_all_by_id(&self, ids: Vec<i32>) -> ItemResult<Vec<Item>> {
        Ok(self
            .base
            .find_all_by_id(ids)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn count(&self) -> ItemResult<u64> {
        Ok(self.base.count().await?)
    }

    async fn delete_by_id(&self, id: i32) -> ItemResult<()> {
        let rows_affected = self.base.delete_by_id(id).await?;

        tracing::debug!(item_id = id, rows_affected, "Deleted item by id");
        Ok(())
    }

    async fn delete(&self, item: Item) -> ItemResult<()> {
        self.base.delete(key_only(item.id)).await?;
        Ok(())
    }

    async fn delete_all(&self) -> ItemResult<()> {
        let rows_affected = self.base.delete_all().await?;

        tracing::info!(rows_affected, "Cleared items");
        Ok(())
    }

    async fn delete_all_batch(&self, items: Vec<Item>) -> ItemResult<()> {
        let models = items.into_iter().map(|item| key_only(item.id)).collect();
        self.base.delete_all_batch(models).await?;
        Ok(())
    }
}
