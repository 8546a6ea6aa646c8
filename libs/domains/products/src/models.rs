use chrono::{DateTime, Utc};
use database::mongodb::{dates::datetime_as_bson, ids::uuid_as_string};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Moderation state of a product
///
/// A product starts `Pending`; a moderator moves it to `Accepted` or
/// `Rejected` and may later override that decision, but never back to `Pending`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
pub enum ProductStatus {
    /// Awaiting moderation
    #[default]
    Pending,
    /// Visible in the public catalogue
    Accepted,
    /// Declined by a moderator
    Rejected,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [
        ProductStatus::Pending,
        ProductStatus::Accepted,
        ProductStatus::Rejected,
    ];

    /// Whether a moderator may move a product from `self` to `target`.
    pub fn can_transition_to(self, target: ProductStatus) -> bool {
        self != target && target != ProductStatus::Pending
    }

    /// Whether any state may move to `self`.
    pub fn is_moderation_target(self) -> bool {
        Self::ALL.iter().any(|from| from.can_transition_to(self))
    }
}

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub external_link: Option<String>,
    /// Email of the submitter
    pub owner_email: String,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub owner_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_reported: bool,
    #[serde(default)]
    pub report_count: i64,
    /// Always equal to the size of `voted_users`
    #[serde(default)]
    pub votes: i64,
    /// Emails of users who voted
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub voted_users: BTreeSet<String>,
    #[serde(with = "datetime_as_bson")]
    pub created_at: DateTime<Utc>,
}

/// DTO for submitting a new product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    pub image: Option<String>,
    #[validate(url)]
    pub external_link: Option<String>,
    #[serde(default, alias = "ownerMail")]
    #[validate(length(min = 1, max = 320, message = "Owner email is required"))]
    pub owner_email: String,
    pub owner_name: Option<String>,
    pub owner_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for editing a product; only presentation fields are reachable
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub image: Option<String>,
    #[validate(url)]
    pub external_link: Option<String>,
    pub owner_name: Option<String>,
    pub owner_image: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Vote request body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "User email is required"))]
    pub user_email: String,
}

/// Query parameters accepted by `GET /products`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, IntoParams)]
pub struct ProductQuery {
    /// Case-insensitive tag substring
    #[validate(length(max = 100))]
    pub search: Option<String>,
    /// Filter by moderation status
    pub status: Option<ProductStatus>,
    /// Filter by featured flag
    pub featured: Option<bool>,
}

/// Store-level filter; every set field must match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub tag: Option<String>,
    pub owner_email: Option<String>,
    pub status: Option<ProductStatus>,
    pub featured: Option<bool>,
}

/// Response for state-changing product operations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductMutation {
    pub message: String,
    pub product: Product,
}

/// Response carrying only a message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl ProductMutation {
    pub fn new(message: impl Into<String>, product: Product) -> Self {
        Self {
            message: message.into(),
            product,
        }
    }
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ProductQuery> for ProductFilter {
    fn from(query: ProductQuery) -> Self {
        Self {
            tag: query.search.filter(|s| !s.trim().is_empty()),
            owner_email: None,
            status: query.status,
            featured: query.featured,
        }
    }
}

impl ProductFilter {
    pub fn by_owner(email: impl Into<String>) -> Self {
        Self {
            owner_email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn by_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    /// In-process evaluation with the same semantics as the Mongo query.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(tag) = &self.tag {
            let needle = tag.to_lowercase();
            if !product
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        if let Some(owner) = &self.owner_email {
            if &product.owner_email != owner {
                return false;
            }
        }
        if let Some(status) = self.status {
            if product.status != status {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if product.is_featured != featured {
                return false;
            }
        }
        true
    }
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.external_link.is_none()
            && self.owner_name.is_none()
            && self.owner_image.is_none()
            && self.tags.is_none()
    }
}

impl Product {
    /// Build a freshly submitted product: pending, unvoted, unflagged.
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            description: input.description,
            image: input.image,
            external_link: input.external_link,
            owner_email: input.owner_email.trim().to_string(),
            owner_name: input.owner_name,
            owner_image: input.owner_image,
            tags: input.tags,
            status: ProductStatus::Pending,
            is_featured: false,
            is_reported: false,
            report_count: 0,
            votes: 0,
            voted_users: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Apply the editable fields of an update
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
        if let Some(external_link) = update.external_link {
            self.external_link = Some(external_link);
        }
        if let Some(owner_name) = update.owner_name {
            self.owner_name = Some(owner_name);
        }
        if let Some(owner_image) = update.owner_image {
            self.owner_image = Some(owner_image);
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
    }

    pub fn has_voted(&self, email: &str) -> bool {
        self.voted_users.contains(email)
    }

    /// Record a vote; returns false if `email` already voted.
    pub fn record_vote(&mut self, email: &str) -> bool {
        if !self.voted_users.insert(email.to_string()) {
            return false;
        }
        self.votes += 1;
        true
    }

    pub fn record_report(&mut self) {
        self.is_reported = true;
        self.report_count += 1;
    }
}
