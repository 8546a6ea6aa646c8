use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter, ProductStatus, UpdateProduct};

/// Repository trait for Product persistence
///
/// Every conditional write is a single atomic check-and-act. Methods that
/// return `Option` yield `None` when the guard did not match; the caller
/// decides whether that means "missing" or "already in that state".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product with default moderation and vote state
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// All products whose name matches exactly
    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>>;

    /// Newest first
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Merge the editable fields; `None` if no product has this id
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// `false` if no product has this id
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Add `email` to the voters and bump the count, unless it already voted
    async fn add_vote(&self, id: Uuid, email: &str) -> ProductResult<Option<Product>>;

    /// Set the status unless the product already has it
    async fn set_status(&self, id: Uuid, status: ProductStatus)
    -> ProductResult<Option<Product>>;

    /// Set the featured flag unless already set
    async fn set_featured(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Flag as reported and increment the report counter
    async fn record_report(&self, id: Uuid) -> ProductResult<Option<Product>>;
}

/// In-memory repository for tests and local development
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn mutate<F>(&self, id: Uuid, apply: F) -> ProductResult<Option<Product>>
    where
        F: FnOnce(&mut Product) -> bool + Send,
    {
        let mut products = self.products.write().await;
        Ok(products
            .get_mut(&id)
            .and_then(|product| apply(product).then(|| product.clone())))
    }
}

fn newest_first(products: &mut [Product]) {
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut found: Vec<Product> = products
            .values()
            .filter(|p| p.name == name)
            .cloned()
            .collect();
        newest_first(&mut found);
        Ok(found)
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut found: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        newest_first(&mut found);
        Ok(found)
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>> {
        self.mutate(id, |product| {
            product.apply_update(input);
            true
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        Ok(products.remove(&id).is_some())
    }

    async fn add_vote(&self, id: Uuid, email: &str) -> ProductResult<Option<Product>> {
        self.mutate(id, |product| product.record_vote(email)).await
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ProductStatus,
    ) -> ProductResult<Option<Product>> {
        self.mutate(id, |product| {
            if !product.status.can_transition_to(status) {
                return false;
            }
            product.status = status;
            true
        })
        .await
    }

    async fn set_featured(&self, id: Uuid) -> ProductResult<Option<Product>> {
        self.mutate(id, |product| {
            if product.is_featured {
                return false;
            }
            product.is_featured = true;
            true
        })
        .await
    }

    async fn record_report(&self, id: Uuid) -> ProductResult<Option<Product>> {
        self.mutate(id, |product| {
            product.record_report();
            true
        })
        .await
    }
}
