//! Product Service - moderation state machine and vote ledger

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, ProductStatus, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Validates input, then issues exactly one conditional write per mutation.
/// When a guarded write matches nothing, a follow-up read tells "missing"
/// (`NotFound`) apart from "already in that state" (an `Already*` error).
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if input.name.trim().is_empty() {
            return Err(ProductError::Validation("Product name is required".into()));
        }
        if input.owner_email.trim().is_empty() {
            return Err(ProductError::Validation("Owner email is required".into()));
        }

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_owner(&self, owner_email: &str) -> ProductResult<Vec<Product>> {
        self.repository
            .list(ProductFilter::by_owner(owner_email))
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if input.is_empty() {
            return self.get_product(id).await;
        }

        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }

    /// Record one vote by `user_email`; a repeat vote is a conflict and changes nothing.
    #[instrument(skip(self))]
    pub async fn cast_vote(&self, id: Uuid, user_email: &str) -> ProductResult<Product> {
        let user_email = normalize_voter(user_email)?;

        match self.repository.add_vote(id, user_email).await? {
            Some(product) => Ok(product),
            None => Err(self
                .missing_or(
                    id,
                    ProductError::AlreadyVoted {
                        product_id: id,
                        user: user_email.to_string(),
                    },
                )
                .await?),
        }
    }

    /// Vote through a product name; refuses names shared by several products.
    #[instrument(skip(self))]
    pub async fn cast_vote_by_name(
        &self,
        product_name: &str,
        user_email: &str,
    ) -> ProductResult<Product> {
        let user_email = normalize_voter(user_email)?;

        let mut matches = self.repository.find_by_name(product_name).await?;
        match matches.len() {
            0 => Err(ProductError::NameNotFound(product_name.to_string())),
            1 => {
                let product = matches.remove(0);
                self.cast_vote(product.id, user_email).await
            }
            count => Err(ProductError::AmbiguousName {
                name: product_name.to_string(),
                count,
            }),
        }
    }

    pub async fn accept(&self, id: Uuid) -> ProductResult<Product> {
        self.transition(id, ProductStatus::Accepted).await
    }

    pub async fn reject(&self, id: Uuid) -> ProductResult<Product> {
        self.transition(id, ProductStatus::Rejected).await
    }

    #[instrument(skip(self))]
    async fn transition(&self, id: Uuid, target: ProductStatus) -> ProductResult<Product> {
        if !target.is_moderation_target() {
            return Err(ProductError::Validation(format!(
                "Products cannot be moved to {}",
                target
            )));
        }

        match self.repository.set_status(id, target).await? {
            Some(product) => Ok(product),
            None => Err(self
                .missing_or(id, ProductError::AlreadyInStatus { id, status: target })
                .await?),
        }
    }

    #[instrument(skip(self))]
    pub async fn feature(&self, id: Uuid) -> ProductResult<Product> {
        match self.repository.set_featured(id).await? {
            Some(product) => Ok(product),
            None => Err(self
                .missing_or(id, ProductError::AlreadyFeatured(id))
                .await?),
        }
    }

    /// Always counts: reporting twice yields `report_count == 2`.
    #[instrument(skip(self))]
    pub async fn report(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .record_report(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// `NotFound` if the product is gone, otherwise `conflict`.
    async fn missing_or(&self, id: Uuid, conflict: ProductError) -> ProductResult<ProductError> {
        Ok(match self.repository.get_by_id(id).await? {
            Some(_) => conflict,
            None => ProductError::NotFound(id),
        })
    }
}

fn normalize_voter(user_email: &str) -> ProductResult<&str> {
    let trimmed = user_email.trim();
    if trimmed.is_empty() {
        return Err(ProductError::Validation("User email is required".into()));
    }
    Ok(trimmed)
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
