use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, PaginatorTrait,
    QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::info;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::Product,
    repository::{ProductStore, ProductTransaction},
};

/// PostgreSQL-backed store; one database transaction per unit of work.
#[derive(Clone)]
pub struct PgProductStore {
    db: DatabaseConnection,
}

impl PgProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn begin(&self) -> ProductResult<Box<dyn ProductTransaction>> {
        let txn = self.db.begin().await?;
        Ok(Box::new(PgProductTransaction { txn }))
    }
}

pub struct PgProductTransaction {
    txn: DatabaseTransaction,
}

fn active_model(id: Option<i64>, product: Product) -> entity::ActiveModel {
    entity::ActiveModel {
        id: id.map_or(NotSet, Set),
        nome: Set(product.name),
        descricao: Set(product.description),
        preco: Set(product.price),
        quantidade_estoque: Set(product.stock_quantity),
    }
}

#[async_trait]
impl ProductTransaction for PgProductTransaction {
    async fn save(&mut self, product: Product) -> ProductResult<Product> {
        let model = match product.id {
            None => {
                let model = active_model(None, product).insert(&self.txn).await?;
                info!(product_id = model.id, "Created product");
                model
            }
            Some(id) => {
                let model = active_model(Some(id), product).update(&self.txn).await?;
                info!(product_id = model.id, "Updated product");
                model
            }
        };

        Ok(model.into())
    }

    /// Locks the row (`FOR UPDATE`) until the transaction ends.
    async fn find_by_id(&mut self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&self.txn)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_all(&mut self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.txn)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete(&mut self, product: Product) -> ProductResult<()> {
        let id = product
            .id
            .ok_or_else(|| ProductError::Internal("cannot delete a product without id".into()))?;

        entity::Entity::delete_by_id(id).exec(&self.txn).await?;
        info!(product_id = id, "Deleted product");
        Ok(())
    }

    async fn count(&mut self) -> ProductResult<u64> {
        Ok(entity::Entity::find().count(&self.txn).await?)
    }

    async fn commit(self: Box<Self>) -> ProductResult<()> {
        self.txn.commit().await?;
        Ok(())
    }
}
