//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use database::mongodb::{bson_datetime, id_filter};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    error::{ErrorKind, WriteFailure},
    options::{FindOptions, IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Position, User};
use crate::repository::UserRepository;

const DUPLICATE_KEY: i32 = 11000;

/// MongoDB implementation of the UserRepository
///
/// Email uniqueness is enforced by a unique index; `init_indexes` must run
/// before the repository takes traffic.
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>("users"),
        }
    }

    pub async fn init_indexes(&self) -> UserResult<()> {
        let email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_email_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.collection.create_index(email).await?;
        tracing::info!("User indexes created successfully");
        Ok(())
    }

    fn upsert_subscriber(email: &str) -> Document {
        let template = User::subscriber(email);
        doc! {
            "$set": { "isSubscribed": true },
            "$setOnInsert": {
                "_id": template.id.to_string(),
                "position": Position::None.to_string(),
                "createdAt": bson_datetime(template.created_at),
            },
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: User) -> UserResult<User> {
        match self.collection.insert_one(&user).await {
            Ok(_) => {
                tracing::info!(user_id = %user.id, "Created user");
                Ok(user)
            }
            Err(e) if is_duplicate_key(&e) => Err(UserError::DuplicateEmail(user.email)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> UserResult<Vec<User>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": 1, "_id": 1 })
            .build();
        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn subscribe(&self, email: &str) -> UserResult<Option<User>> {
        // An already-subscribed user fails the filter, so the upsert collides
        // with the unique email index instead of inserting a second document.
        let result = self
            .collection
            .find_one_and_update(
                doc! { "email": email, "isSubscribed": { "$ne": true } },
                Self::upsert_subscriber(email),
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await;

        match result {
            Ok(user) => {
                tracing::info!(email, "User subscribed");
                Ok(user)
            }
            Err(e) if is_duplicate_key(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn set_position(&self, id: Uuid, position: Position) -> UserResult<Option<User>> {
        let mut filter = id_filter(id);
        filter.insert("position", doc! { "$ne": position.to_string() });

        let updated = self
            .collection
            .find_one_and_update(filter, doc! { "$set": { "position": position.to_string() } })
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(user_id = %id, %position, "User position changed");
        }
        Ok(updated)
    }
}
