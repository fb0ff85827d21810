//! Generic repository over a single SeaORM entity.
//!
//! [`BaseRepository`] carries the CRUD, paging and batch operations every
//! domain repository needs, so domain crates only add entity-specific
//! queries on top. It is stateless with respect to domain data: it borrows
//! a pooled connection per call and owns nothing between calls.

mod page;
mod sort;

pub use page::{Page, PageRequest, DEFAULT_PAGE_SIZE};
pub use sort::{Sort, SortDirection, SortOrder};

use std::marker::PhantomData;
use std::str::FromStr;

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IdenStatic, IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait,
    QueryFilter, QueryOrder, Select, TransactionTrait,
};
use tracing::debug;

use crate::common::{DatabaseError, DatabaseResult};

type PrimaryKeyValue<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Generic repository for entities with a single-column primary key.
///
/// Reads that find nothing return `None` or an empty collection, never an
/// error; errors are reserved for validation, constraint violations and
/// connectivity (see [`DatabaseError`]). Batch writes run inside one
/// transaction, so a failure mid-batch leaves nothing applied.
pub struct BaseRepository<E>
where
    E: EntityTrait,
{
    db: DatabaseConnection,
    entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            entity: PhantomData,
        }
    }
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }

    /// Borrow the underlying connection for entity-specific queries
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn primary_key_column() -> DatabaseResult<E::Column> {
        let mut keys = <E::PrimaryKey as Iterable>::iter();
        let column = keys
            .next()
            .map(PrimaryKeyToColumn::into_column)
            .ok_or_else(|| {
                DatabaseError::Unsupported("entity has no primary key column".to_string())
            })?;
        if keys.next().is_some() {
            return Err(DatabaseError::Unsupported(
                "composite primary keys are not supported".to_string(),
            ));
        }
        Ok(column)
    }

    fn apply_sort(mut query: Select<E>, sort: &Sort) -> DatabaseResult<Select<E>> {
        for order in &sort.orders {
            let column = E::Column::from_str(&order.field).map_err(|_| {
                DatabaseError::Validation(format!("unknown sort field '{}'", order.field))
            })?;
            query = query.order_by(column, order.direction.as_order());
        }
        Ok(query)
    }

    /// Insert or update one row and return what the store now holds.
    ///
    /// A model without its key set is a plain insert and the store assigns
    /// the key. A model with its key set is an upsert: an existing row with
    /// that key is updated, otherwise the row is inserted as given. Only the
    /// columns actually set on the model are written on the update path.
    pub async fn save<A>(&self, model: A) -> DatabaseResult<E::Model>
    where
        A: ActiveModelTrait<Entity = E> + Send,
        E::Model: IntoActiveModel<A>,
    {
        self.save_on(&self.db, model).await
    }

    /// Batch [`BaseRepository::save`] inside a single transaction.
    ///
    /// All-or-nothing: the first failure rolls the whole batch back. The
    /// returned models match the input ordering.
    pub async fn save_all<A>(&self, models: Vec<A>) -> DatabaseResult<Vec<E::Model>>
    where
        A: ActiveModelTrait<Entity = E> + Send,
        E::Model: IntoActiveModel<A>,
    {
        let txn = self.db.begin().await?;
        let mut saved = Vec::with_capacity(models.len());
        for model in models {
            // dropping the transaction on error rolls it back
            saved.push(self.save_on(&txn, model).await?);
        }
        txn.commit().await?;

        debug!(rows = saved.len(), "Batch save committed");
        Ok(saved)
    }

    async fn save_on<C, A>(&self, conn: &C, model: A) -> DatabaseResult<E::Model>
    where
        C: ConnectionTrait,
        A: ActiveModelTrait<Entity = E> + Send,
        E::Model: IntoActiveModel<A>,
    {
        let key = Self::primary_key_column()?;
        let has_key = !matches!(model.get(key), ActiveValue::NotSet);
        let set_columns: Vec<E::Column> = E::Column::iter()
            .filter(|c| c.as_str() != key.as_str())
            .filter(|c| !matches!(model.get(*c), ActiveValue::NotSet))
            .collect();

        let insert = E::insert(model);
        let insert = if has_key {
            let conflict = if set_columns.is_empty() {
                OnConflict::column(key).do_nothing().to_owned()
            } else {
                OnConflict::column(key).update_columns(set_columns).to_owned()
            };
            insert.on_conflict(conflict)
        } else {
            insert
        };

        Ok(insert.exec_with_returning(conn).await?)
    }

    /// Fetch one row by key; `None` when absent.
    pub async fn find_by_id(&self, id: PrimaryKeyValue<E>) -> DatabaseResult<Option<E::Model>> {
        Ok(E::find_by_id(id).one(&self.db).await?)
    }

    /// Whether a row with this key exists. Only fails on connectivity.
    pub async fn exists_by_id(&self, id: PrimaryKeyValue<E>) -> DatabaseResult<bool> {
        let matches = E::find_by_id(id).count(&self.db).await?;
        Ok(matches > 0)
    }

    /// All rows, in store order.
    pub async fn find_all(&self) -> DatabaseResult<Vec<E::Model>> {
        Ok(E::find().all(&self.db).await?)
    }

    /// All rows ordered by the given sort keys, applied in listed order.
    pub async fn find_all_sorted(&self, sort: &Sort) -> DatabaseResult<Vec<E::Model>> {
        let query = Self::apply_sort(E::find(), sort)?;
        Ok(query.all(&self.db).await?)
    }

    /// One page of rows, with totals counted by the store.
    ///
    /// The count and the content are separate statements, so
    /// `total_elements` is approximate under concurrent writers.
    pub async fn find_all_paged(&self, request: &PageRequest) -> DatabaseResult<Page<E::Model>> {
        request.validate()?;

        let query = Self::apply_sort(E::find(), &request.sort)?;
        let paginator = query.paginate(&self.db, request.size);
        let total_elements = paginator.num_items().await?;
        let content = paginator.fetch_page(request.page).await?;

        Ok(Page::new(content, request.page, request.size, total_elements))
    }

    /// The subset of rows whose keys are in `ids`. Missing keys are simply
    /// absent from the result; the row order is store-defined.
    pub async fn find_all_by_id(
        &self,
        ids: Vec<PrimaryKeyValue<E>>,
    ) -> DatabaseResult<Vec<E::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let key = Self::primary_key_column()?;
        Ok(E::find().filter(key.is_in(ids)).all(&self.db).await?)
    }

    /// Total number of rows. Approximate under concurrent writers.
    pub async fn count(&self) -> DatabaseResult<u64> {
        Ok(E::find().count(&self.db).await?)
    }

    /// Delete by key; a missing row is a no-op, not an error. Returns the
    /// number of rows removed (0 or 1).
    pub async fn delete_by_id(&self, id: PrimaryKeyValue<E>) -> DatabaseResult<u64> {
        let result = E::delete_by_id(id).exec(&self.db).await?;

        debug!(rows_affected = result.rows_affected, "Deleted by id");
        Ok(result.rows_affected)
    }

    /// Delete one row by the model's key, with the same idempotence as
    /// [`BaseRepository::delete_by_id`].
    pub async fn delete<A>(&self, model: A) -> DatabaseResult<u64>
    where
        A: ActiveModelTrait<Entity = E> + Send,
    {
        let result = E::delete(model).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    /// Delete every row of the entity. Returns the number of rows removed.
    pub async fn delete_all(&self) -> DatabaseResult<u64> {
        let result = E::delete_many().exec(&self.db).await?;

        debug!(rows_affected = result.rows_affected, "Deleted all rows");
        Ok(result.rows_affected)
    }

    /// Delete the given models by key inside a single transaction.
    pub async fn delete_all_batch<A>(&self, models: Vec<A>) -> DatabaseResult<u64>
    where
        A: ActiveModelTrait<Entity = E> + Send,
    {
        let txn = self.db.begin().await?;
        let mut rows_affected = 0;
        for model in models {
            rows_affected += E::delete(model).exec(&txn).await?.rows_affected;
        }
        txn.commit().await?;

        debug!(rows_affected, "Batch delete committed");
        Ok(rows_affected)
    }
}
