//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductCount, ProductRepresentation};
use crate::repository::ProductStore;

/// Product service providing the CRUD operations
///
/// Each operation validates its input before touching the store and runs in
/// a single store transaction, committed only when the operation succeeds.
pub struct ProductService<S: ProductStore> {
    store: Arc<S>,
}

impl<S: ProductStore> ProductService<S> {
    /// Create a new ProductService with the given store
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a new product, ignoring any id in the input
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: ProductRepresentation) -> ProductResult<ProductRepresentation> {
        let product = to_entity(None, input)?;

        let mut tx = self.store.begin().await?;
        let saved = tx.save(product).await?;
        tx.commit().await?;

        Ok(to_representation(saved))
    }

    /// All products, ordered by id
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ProductResult<Vec<ProductRepresentation>> {
        let mut tx = self.store.begin().await?;
        let products = tx.find_all().await?;
        tx.commit().await?;

        Ok(products.into_iter().map(to_representation).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> ProductResult<ProductRepresentation> {
        let mut tx = self.store.begin().await?;
        let product = tx.find_by_id(id).await?.ok_or(ProductError::NotFound(id))?;
        tx.commit().await?;

        Ok(to_representation(product))
    }

    /// Overwrite all mutable fields of an existing product. The id never changes.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: ProductRepresentation,
    ) -> ProductResult<ProductRepresentation> {
        let changes = to_entity(Some(id), input)?;

        let mut tx = self.store.begin().await?;
        let mut existing = tx.find_by_id(id).await?.ok_or(ProductError::NotFound(id))?;

        existing.name = changes.name;
        existing.description = changes.description;
        existing.price = changes.price;
        existing.stock_quantity = changes.stock_quantity;

        let saved = tx.save(existing).await?;
        tx.commit().await?;

        Ok(to_representation(saved))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ProductResult<()> {
        let mut tx = self.store.begin().await?;
        let product = tx.find_by_id(id).await?.ok_or(ProductError::NotFound(id))?;
        tx.delete(product).await?;
        tx.commit().await
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> ProductResult<ProductCount> {
        let mut tx = self.store.begin().await?;
        let count = tx.count().await?;
        tx.commit().await?;

        Ok(ProductCount(count))
    }
}

/// Validates `input` and builds the entity it describes.
fn to_entity(id: Option<i64>, input: ProductRepresentation) -> ProductResult<Product> {
    input.validate()?;

    let (Some(price), Some(stock_quantity)) = (input.price, input.stock_quantity) else {
        return Err(ProductError::Internal(
            "validated representation without price or stock".into(),
        ));
    };

    Ok(Product {
        id,
        name: input.name,
        description: input.description,
        price,
        stock_quantity,
    })
}

fn to_representation(product: Product) -> ProductRepresentation {
    ProductRepresentation {
        id: product.id,
        name: product.name,
        description: product.description,
        price: Some(product.price),
        stock_quantity: Some(product.stock_quantity),
    }
}
