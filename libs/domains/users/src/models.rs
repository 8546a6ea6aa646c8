use chrono::{DateTime, Utc};
use database::mongodb::{dates::datetime_as_bson, ids::uuid_as_string};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Staff position of a user
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Position {
    #[default]
    None,
    Moderator,
    Admin,
}

/// User entity - represents a user stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    /// Unique per user
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub is_subscribed: bool,
    #[serde(default)]
    pub position: Position,
    #[serde(with = "datetime_as_bson")]
    pub created_at: DateTime<Utc>,
}

/// DTO for registering a user
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[serde(default)]
    #[validate(email(message = "A valid email is required"), length(max = 320))]
    pub email: String,
    #[validate(length(max = 100))]
    pub name: Option<String>,
    pub photo: Option<String>,
}

/// Body of `POST /subscribe`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubscribeRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Answer of `GET /users/{email}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub email: String,
    pub subscription_status: bool,
}

/// Answer of `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCreated {
    pub message: String,
    pub inserted_id: Uuid,
}

/// Response for state-changing user operations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserMutation {
    pub message: String,
    pub user: User,
}

impl User {
    pub fn new(input: CreateUser) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: input.email.trim().to_string(),
            name: input.name,
            photo: input.photo,
            is_subscribed: false,
            position: Position::None,
            created_at: Utc::now(),
        }
    }

    /// Placeholder record created when an unknown email subscribes
    pub fn subscriber(email: &str) -> Self {
        let mut user = Self::new(CreateUser {
            email: email.to_string(),
            ..Default::default()
        });
        user.is_subscribed = true;
        user
    }
}

impl From<&User> for SubscriptionStatus {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            subscription_status: user.is_subscribed,
        }
    }
}
