use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

/// Entry point to product persistence.
///
/// Every service operation opens exactly one [`ProductTransaction`] and
/// commits it once the operation has succeeded. Implementations can use
/// different storage backends (PostgreSQL, in-memory, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Open a unit of work
    async fn begin(&self) -> ProductResult<Box<dyn ProductTransaction>>;
}

/// A unit of work against the product store.
///
/// Writes become visible to other transactions only after [`commit`].
/// Dropping the transaction without committing discards them.
///
/// [`commit`]: ProductTransaction::commit
#[async_trait]
pub trait ProductTransaction: Send {
    /// Insert a product without id, or overwrite the one with the same id.
    /// Returns the stored product with its id assigned.
    async fn save(&mut self, product: Product) -> ProductResult<Product>;

    async fn find_by_id(&mut self, id: i64) -> ProductResult<Option<Product>>;

    /// All products, ordered by id
    async fn find_all(&mut self) -> ProductResult<Vec<Product>>;

    async fn delete(&mut self, product: Product) -> ProductResult<()>;

    async fn count(&mut self) -> ProductResult<u64>;

    async fn commit(self: Box<Self>) -> ProductResult<()>;
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    products: BTreeMap<i64, Product>,
    last_id: i64,
}

/// Process-local store, used when no database is configured and in tests.
///
/// Transactions are serialised: `begin` waits until the previous
/// transaction has been committed or dropped. Ids start at 1 and are never
/// reused.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn begin(&self) -> ProductResult<Box<dyn ProductTransaction>> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryTransaction { guard, staged }))
    }
}

struct InMemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait]
impl ProductTransaction for InMemoryTransaction {
    async fn save(&mut self, mut product: Product) -> ProductResult<Product> {
        let state = &mut self.staged;

        let id = match product.id {
            Some(id) => {
                state.last_id = state.last_id.max(id);
                info!(product_id = id, "Updated product");
                id
            }
            None => {
                state.last_id += 1;
                info!(product_id = state.last_id, "Created product");
                state.last_id
            }
        };

        product.id = Some(id);
        state.products.insert(id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&mut self, id: i64) -> ProductResult<Option<Product>> {
        Ok(self.staged.products.get(&id).cloned())
    }

    async fn find_all(&mut self) -> ProductResult<Vec<Product>> {
        Ok(self.staged.products.values().cloned().collect())
    }

    async fn delete(&mut self, product: Product) -> ProductResult<()> {
        let id = product
            .id
            .ok_or_else(|| ProductError::Internal("cannot delete a product without id".into()))?;

        self.staged.products.remove(&id);
        info!(product_id = id, "Deleted product");
        Ok(())
    }

    async fn count(&mut self) -> ProductResult<u64> {
        Ok(self.staged.products.len() as u64)
    }

    async fn commit(self: Box<Self>) -> ProductResult<()> {
        let InMemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}
