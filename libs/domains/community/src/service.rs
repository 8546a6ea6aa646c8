use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CommunityError, CommunityResult};
use crate::models::{
    Coupon, CreateCoupon, CreateHelpRequest, CreateNewsletterSubscription, CreateReview,
    HelpRequest, NewsletterSubscription, Review,
};
use crate::repository::CommunityRepository;

/// Reviews, coupons, newsletter sign-ups and help requests
pub struct CommunityService<R: CommunityRepository> {
    repository: Arc<R>,
}

impl<R: CommunityRepository> CommunityService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input))]
    pub async fn add_review(&self, input: CreateReview) -> CommunityResult<Review> {
        let review = input
            .into_review()
            .map_err(|problem| CommunityError::Validation(problem.message().to_string()))?;

        self.repository.add_review(review).await
    }

    pub async fn list_reviews(&self) -> CommunityResult<Vec<Review>> {
        self.repository.list_reviews().await
    }

    pub async fn reviews_for_product(&self, product_id: Uuid) -> CommunityResult<Vec<Review>> {
        self.repository.reviews_for_product(product_id).await
    }

    #[instrument(skip(self, input), fields(code = %input.coupon_code))]
    pub async fn add_coupon(&self, input: CreateCoupon) -> CommunityResult<Coupon> {
        input
            .validate()
            .map_err(|e| CommunityError::Validation(e.to_string()))?;

        self.repository.add_coupon(input.into()).await
    }

    pub async fn list_coupons(&self) -> CommunityResult<Vec<Coupon>> {
        self.repository.list_coupons().await
    }

    #[instrument(skip(self))]
    pub async fn delete_coupon(&self, id: Uuid) -> CommunityResult<()> {
        if self.repository.delete_coupon(id).await? {
            Ok(())
        } else {
            Err(CommunityError::CouponNotFound(id))
        }
    }

    #[instrument(skip(self, input))]
    pub async fn subscribe_newsletter(
        &self,
        input: CreateNewsletterSubscription,
    ) -> CommunityResult<NewsletterSubscription> {
        input
            .validate()
            .map_err(|e| CommunityError::Validation(e.to_string()))?;

        self.repository.add_subscription(input.into()).await
    }

    #[instrument(skip(self, input))]
    pub async fn request_help(&self, input: CreateHelpRequest) -> CommunityResult<HelpRequest> {
        input
            .validate()
            .map_err(|e| CommunityError::Validation(e.to_string()))?;

        self.repository.add_help_request(input.into()).await
    }
}

impl<R: CommunityRepository> Clone for CommunityService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
