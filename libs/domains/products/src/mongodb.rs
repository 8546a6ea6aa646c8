//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use database::mongodb::id_filter;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{FindOptions, IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter, ProductStatus, UpdateProduct};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
///
/// Conditional writes are single `findOneAndUpdate` calls with the guard in
/// the filter, so concurrent requests never lose an update.
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "products")
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for the lookups the API performs
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = |keys: Document, name: &str| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(name.to_string()).build())
                .build()
        };

        let indexes = vec![
            index(doc! { "name": 1 }, "idx_name"),
            index(doc! { "ownerEmail": 1 }, "idx_owner_email"),
            index(doc! { "tags": 1 }, "idx_tags"),
            index(doc! { "status": 1, "createdAt": -1 }, "idx_status_created"),
            index(doc! { "isFeatured": 1 }, "idx_featured"),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Build a MongoDB filter document from ProductFilter
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(tag) = &filter.tag {
            doc.insert(
                "tags",
                doc! { "$regex": regex::escape(tag), "$options": "i" },
            );
        }

        if let Some(owner) = &filter.owner_email {
            doc.insert("ownerEmail", owner);
        }

        if let Some(status) = filter.status {
            doc.insert("status", status.to_string());
        }

        if let Some(featured) = filter.featured {
            doc.insert("isFeatured", featured);
        }

        doc
    }

    /// `$set` document for the fields present in an update
    fn build_update(input: &UpdateProduct) -> Document {
        let mut set = doc! {};

        if let Some(name) = &input.name {
            set.insert("name", name);
        }
        if let Some(description) = &input.description {
            set.insert("description", description);
        }
        if let Some(image) = &input.image {
            set.insert("image", image);
        }
        if let Some(link) = &input.external_link {
            set.insert("externalLink", link);
        }
        if let Some(owner_name) = &input.owner_name {
            set.insert("ownerName", owner_name);
        }
        if let Some(owner_image) = &input.owner_image {
            set.insert("ownerImage", owner_image);
        }
        if let Some(tags) = &input.tags {
            set.insert("tags", tags.clone());
        }

        set
    }

    /// Newest first; v7 ids order by creation time, so `_id` breaks ties
    fn newest_first() -> FindOptions {
        FindOptions::builder()
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .build()
    }

    async fn find_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> ProductResult<Option<Product>> {
        let product = self
            .collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(product)
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(doc! { "name": name })
            .with_options(Self::newest_first())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(Self::build_filter(&filter))
            .with_options(Self::newest_first())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let set = Self::build_update(&input);
        if set.is_empty() {
            return self.get_by_id(id).await;
        }

        let updated = self
            .find_and_update(id_filter(id), doc! { "$set": set })
            .await?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn add_vote(&self, id: Uuid, email: &str) -> ProductResult<Option<Product>> {
        let mut filter = id_filter(id);
        filter.insert("votedUsers", doc! { "$ne": email });

        let update = doc! {
            "$inc": { "votes": 1_i64 },
            "$addToSet": { "votedUsers": email },
        };

        let updated = self.find_and_update(filter, update).await?;
        if let Some(product) = &updated {
            tracing::info!(product_id = %id, votes = product.votes, "Vote recorded");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn set_status(
        &self,
        id: Uuid,
        status: ProductStatus,
    ) -> ProductResult<Option<Product>> {
        // For a valid target, `can_transition_to` only refuses the current state.
        let mut filter = id_filter(id);
        filter.insert("status", doc! { "$ne": status.to_string() });

        let updated = self
            .find_and_update(filter, doc! { "$set": { "status": status.to_string() } })
            .await?;
        if updated.is_some() {
            tracing::info!(product_id = %id, %status, "Product status changed");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn set_featured(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let mut filter = id_filter(id);
        filter.insert("isFeatured", doc! { "$ne": true });

        let updated = self
            .find_and_update(filter, doc! { "$set": { "isFeatured": true } })
            .await?;
        if updated.is_some() {
            tracing::info!(product_id = %id, "Product featured");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn record_report(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let update = doc! {
            "$set": { "isReported": true },
            "$inc": { "reportCount": 1_i64 },
        };

        let updated = self.find_and_update(id_filter(id), update).await?;
        if let Some(product) = &updated {
            tracing::info!(product_id = %id, report_count = product.report_count, "Product reported");
        }
        Ok(updated)
    }
}
