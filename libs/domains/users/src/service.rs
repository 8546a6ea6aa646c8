use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, Position, SubscriptionStatus, User};
use crate::repository::UserRepository;

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a user; the email must not be taken yet
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self
            .repository
            .get_by_email(input.email.trim())
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateEmail(input.email));
        }

        self.repository.create(User::new(input)).await
    }

    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn subscription_status(&self, email: &str) -> UserResult<SubscriptionStatus> {
        let user = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| UserError::EmailNotFound(email.to_string()))?;

        Ok(SubscriptionStatus::from(&user))
    }

    /// Subscribe `email` to updates, registering it if unknown
    #[instrument(skip(self))]
    pub async fn subscribe(&self, email: &str) -> UserResult<User> {
        let email = email.trim();
        if email.is_empty() {
            return Err(UserError::Validation("Email is required".into()));
        }

        self.repository
            .subscribe(email)
            .await?
            .ok_or_else(|| UserError::AlreadySubscribed(email.to_string()))
    }

    pub async fn make_moderator(&self, id: Uuid) -> UserResult<User> {
        self.promote(id, Position::Moderator).await
    }

    pub async fn make_admin(&self, id: Uuid) -> UserResult<User> {
        self.promote(id, Position::Admin).await
    }

    #[instrument(skip(self))]
    async fn promote(&self, id: Uuid, position: Position) -> UserResult<User> {
        if let Some(user) = self.repository.set_position(id, position).await? {
            return Ok(user);
        }

        match self.repository.get_by_id(id).await? {
            Some(_) => Err(UserError::AlreadyInPosition { id, position }),
            None => Err(UserError::NotFound(id)),
        }
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use mockall::predicate::eq;

    fn input(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            name: Some("Ada".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_user_rejects_existing_email() {
        let service = UserService::new(InMemoryUserRepository::new());
        service.create_user(input("a@x.com")).await.unwrap();

        let err = service.create_user(input("a@x.com")).await.unwrap_err();
        assert!(matches!(err, UserError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_create_user_validates_email() {
        let service = UserService::new(InMemoryUserRepository::new());
        let err = service.create_user(input("not-an-email")).await.unwrap_err();
        assert!(matches!(err, UserError::Validation(_)));
    }

    #[tokio::test]
    async fn test_subscription_status_of_unknown_email() {
        let service = UserService::new(InMemoryUserRepository::new());
        let err = service
            .subscription_status("ghost@x.com")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::EmailNotFound(_)));
    }

    #[tokio::test]
    async fn test_subscribe_twice_is_conflict() {
        let service = UserService::new(InMemoryUserRepository::new());
        service.create_user(input("a@x.com")).await.unwrap();

        assert!(
            !service
                .subscription_status("a@x.com")
                .await
                .unwrap()
                .subscription_status
        );

        service.subscribe("a@x.com").await.unwrap();
        assert!(
            service
                .subscription_status("a@x.com")
                .await
                .unwrap()
                .subscription_status
        );

        let err = service.subscribe("a@x.com").await.unwrap_err();
        assert!(matches!(err, UserError::AlreadySubscribed(_)));
    }

    #[tokio::test]
    async fn test_subscribe_requires_email() {
        let service = UserService::new(InMemoryUserRepository::new());
        let err = service.subscribe("  ").await.unwrap_err();
        assert!(matches!(err, UserError::Validation(_)));
    }

    #[tokio::test]
    async fn test_promote_twice_is_already_in_position() {
        let service = UserService::new(InMemoryUserRepository::new());
        let user = service.create_user(input("a@x.com")).await.unwrap();

        let promoted = service.make_moderator(user.id).await.unwrap();
        assert_eq!(promoted.position, Position::Moderator);

        let err = service.make_moderator(user.id).await.unwrap_err();
        assert!(matches!(
            err,
            UserError::AlreadyInPosition {
                position: Position::Moderator,
                ..
            }
        ));

        let admin = service.make_admin(user.id).await.unwrap();
        assert_eq!(admin.position, Position::Admin);
    }

    #[tokio::test]
    async fn test_promote_missing_user_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_set_position()
            .with(eq(id), eq(Position::Admin))
            .returning(|_, _| Ok(None));
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        let err = service.make_admin(id).await.unwrap_err();
        assert!(matches!(err, UserError::NotFound(_)));
    }
}
