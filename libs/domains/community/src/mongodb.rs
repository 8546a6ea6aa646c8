//! MongoDB implementation of CommunityRepository

use async_trait::async_trait;
use database::mongodb::id_filter;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::doc,
    options::{FindOptions, IndexOptions},
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::error::CommunityResult;
use crate::models::{Coupon, HelpRequest, NewsletterSubscription, Review};
use crate::repository::CommunityRepository;

/// MongoDB implementation of the CommunityRepository
///
/// Collection names match the ones the storefront already reads.
pub struct MongoCommunityRepository {
    reviews: Collection<Review>,
    coupons: Collection<Coupon>,
    newsletters: Collection<NewsletterSubscription>,
    help: Collection<HelpRequest>,
}

impl MongoCommunityRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            reviews: db.collection("reviews"),
            coupons: db.collection("coupons"),
            newsletters: db.collection("newsLetters"),
            help: db.collection("help"),
        }
    }

    pub async fn init_indexes(&self) -> CommunityResult<()> {
        let by_product = IndexModel::builder()
            .keys(doc! { "productId": 1, "createdAt": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_product_created".to_string())
                    .build(),
            )
            .build();

        self.reviews.create_index(by_product).await?;
        tracing::info!("Community indexes created successfully");
        Ok(())
    }

    fn oldest_first() -> FindOptions {
        FindOptions::builder()
            .sort(doc! { "createdAt": 1, "_id": 1 })
            .build()
    }
}

async fn insert<T>(collection: &Collection<T>, item: T) -> CommunityResult<T>
where
    T: Serialize + Send + Sync,
{
    collection.insert_one(&item).await?;
    Ok(item)
}

#[async_trait]
impl CommunityRepository for MongoCommunityRepository {
    #[instrument(skip(self, review), fields(product_id = %review.product_id))]
    async fn add_review(&self, review: Review) -> CommunityResult<Review> {
        let review = insert(&self.reviews, review).await?;
        tracing::info!(review_id = %review.id, "Review added");
        Ok(review)
    }

    #[instrument(skip(self))]
    async fn list_reviews(&self) -> CommunityResult<Vec<Review>> {
        let cursor = self
            .reviews
            .find(doc! {})
            .with_options(Self::oldest_first())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn reviews_for_product(&self, product_id: Uuid) -> CommunityResult<Vec<Review>> {
        let cursor = self
            .reviews
            .find(doc! { "productId": product_id.to_string() })
            .with_options(Self::oldest_first())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, coupon), fields(code = %coupon.coupon_code))]
    async fn add_coupon(&self, coupon: Coupon) -> CommunityResult<Coupon> {
        let coupon = insert(&self.coupons, coupon).await?;
        tracing::info!(coupon_id = %coupon.id, "Coupon added");
        Ok(coupon)
    }

    #[instrument(skip(self))]
    async fn list_coupons(&self) -> CommunityResult<Vec<Coupon>> {
        let cursor = self
            .coupons
            .find(doc! {})
            .with_options(Self::oldest_first())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn delete_coupon(&self, id: Uuid) -> CommunityResult<bool> {
        let result = self.coupons.delete_one(id_filter(id)).await?;
        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(coupon_id = %id, "Coupon deleted");
        }
        Ok(deleted)
    }

    #[instrument(skip(self, subscription))]
    async fn add_subscription(
        &self,
        subscription: NewsletterSubscription,
    ) -> CommunityResult<NewsletterSubscription> {
        insert(&self.newsletters, subscription).await
    }

    #[instrument(skip(self, help))]
    async fn add_help_request(&self, help: HelpRequest) -> CommunityResult<HelpRequest> {
        insert(&self.help, help).await
    }
}
