use chrono::{DateTime, NaiveDate, Utc};
use database::mongodb::{dates::datetime_as_bson, ids::uuid_as_string};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// A user's review of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    #[serde(with = "uuid_as_string")]
    pub product_id: Uuid,
    pub user_name: String,
    pub user_image: String,
    pub description: String,
    pub rating: i32,
    #[serde(with = "datetime_as_bson")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /reviews`; every field is mandatory
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    pub product_id: Option<String>,
    pub user_name: Option<String>,
    pub user_image: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreated {
    pub message: String,
    pub review_id: Uuid,
}

/// Discount coupon shown on the storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub coupon_code: String,
    pub expiry_date: NaiveDate,
    pub description: String,
    pub discount_amount: f64,
    #[serde(with = "datetime_as_bson")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoupon {
    #[validate(length(min = 1, max = 64, message = "Coupon code is required"))]
    pub coupon_code: String,
    pub expiry_date: NaiveDate,
    #[validate(length(min = 1, max = 1000, message = "Description is required"))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "Discount amount must be positive"))]
    pub discount_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CouponMutation {
    pub message: String,
    pub coupon: Coupon,
}

/// Newsletter sign-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub email: String,
    #[serde(with = "datetime_as_bson")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateNewsletterSubscription {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewsletterMutation {
    pub message: String,
    pub subscription: NewsletterSubscription,
}

/// Message sent through the help form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(with = "datetime_as_bson")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateHelpRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HelpMutation {
    pub message: String,
    pub help: HelpRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Outcome of checking a review submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewProblem {
    MissingField,
    RatingOutOfRange,
    InvalidProductId,
}

impl ReviewProblem {
    pub fn message(self) -> &'static str {
        match self {
            ReviewProblem::MissingField => "All fields are required!",
            ReviewProblem::RatingOutOfRange => "Rating must be a number between 1 and 5.",
            ReviewProblem::InvalidProductId => "Invalid product ID format",
        }
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl CreateReview {
    /// Turn a submission into a stored review, or say what is wrong with it.
    pub fn into_review(self) -> Result<Review, ReviewProblem> {
        let (Some(product_id), Some(user_name), Some(user_image), Some(description), Some(rating)) = (
            present(&self.product_id),
            present(&self.user_name),
            present(&self.user_image),
            present(&self.description),
            self.rating,
        ) else {
            return Err(ReviewProblem::MissingField);
        };

        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReviewProblem::RatingOutOfRange);
        }

        let product_id =
            Uuid::parse_str(product_id).map_err(|_| ReviewProblem::InvalidProductId)?;

        Ok(Review {
            id: Uuid::now_v7(),
            product_id,
            user_name: user_name.to_string(),
            user_image: user_image.to_string(),
            description: description.to_string(),
            rating,
            created_at: Utc::now(),
        })
    }
}

impl From<CreateCoupon> for Coupon {
    fn from(input: CreateCoupon) -> Self {
        Self {
            id: Uuid::now_v7(),
            coupon_code: input.coupon_code.trim().to_string(),
            expiry_date: input.expiry_date,
            description: input.description,
            discount_amount: input.discount_amount,
            created_at: Utc::now(),
        }
    }
}

impl From<CreateNewsletterSubscription> for NewsletterSubscription {
    fn from(input: CreateNewsletterSubscription) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: input.email.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

impl From<CreateHelpRequest> for HelpRequest {
    fn from(input: CreateHelpRequest) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            message: input.message,
            created_at: Utc::now(),
        }
    }
}
