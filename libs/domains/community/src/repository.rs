use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::CommunityResult;
use crate::models::{Coupon, HelpRequest, NewsletterSubscription, Review};

/// Repository trait for reviews, coupons, newsletter sign-ups and help requests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    async fn add_review(&self, review: Review) -> CommunityResult<Review>;

    /// Oldest first
    async fn list_reviews(&self) -> CommunityResult<Vec<Review>>;

    async fn reviews_for_product(&self, product_id: Uuid) -> CommunityResult<Vec<Review>>;

    async fn add_coupon(&self, coupon: Coupon) -> CommunityResult<Coupon>;

    async fn list_coupons(&self) -> CommunityResult<Vec<Coupon>>;

    /// `false` if no coupon has this id
    async fn delete_coupon(&self, id: Uuid) -> CommunityResult<bool>;

    async fn add_subscription(
        &self,
        subscription: NewsletterSubscription,
    ) -> CommunityResult<NewsletterSubscription>;

    async fn add_help_request(&self, help: HelpRequest) -> CommunityResult<HelpRequest>;
}

/// In-memory implementation of CommunityRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCommunityRepository {
    reviews: Arc<RwLock<Vec<Review>>>,
    coupons: Arc<RwLock<HashMap<Uuid, Coupon>>>,
    subscriptions: Arc<RwLock<Vec<NewsletterSubscription>>>,
    help_requests: Arc<RwLock<Vec<HelpRequest>>>,
}

impl InMemoryCommunityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscription_count(&self) -> usize {
        self.subscriptions.read().await.len()
    }

    pub async fn help_request_count(&self) -> usize {
        self.help_requests.read().await.len()
    }
}

#[async_trait]
impl CommunityRepository for InMemoryCommunityRepository {
    async fn add_review(&self, review: Review) -> CommunityResult<Review> {
        self.reviews.write().await.push(review.clone());
        Ok(review)
    }

    async fn list_reviews(&self) -> CommunityResult<Vec<Review>> {
        Ok(self.reviews.read().await.clone())
    }

    async fn reviews_for_product(&self, product_id: Uuid) -> CommunityResult<Vec<Review>> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn add_coupon(&self, coupon: Coupon) -> CommunityResult<Coupon> {
        self.coupons.write().await.insert(coupon.id, coupon.clone());
        Ok(coupon)
    }

    async fn list_coupons(&self) -> CommunityResult<Vec<Coupon>> {
        let coupons = self.coupons.read().await;
        let mut all: Vec<Coupon> = coupons.values().cloned().collect();
        all.sort_by_key(|c| c.id);
        Ok(all)
    }

    async fn delete_coupon(&self, id: Uuid) -> CommunityResult<bool> {
        Ok(self.coupons.write().await.remove(&id).is_some())
    }

    async fn add_subscription(
        &self,
        subscription: NewsletterSubscription,
    ) -> CommunityResult<NewsletterSubscription> {
        self.subscriptions.write().await.push(subscription.clone());
        Ok(subscription)
    }

    async fn add_help_request(&self, help: HelpRequest) -> CommunityResult<HelpRequest> {
        self.help_requests.write().await.push(help.clone());
        Ok(help)
    }
}
