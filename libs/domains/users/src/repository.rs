use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Position, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; fails with `DuplicateEmail` if the email is taken
    async fn create(&self, user: User) -> UserResult<User>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn list(&self) -> UserResult<Vec<User>>;

    /// Mark `email` as subscribed, creating the user if needed.
    ///
    /// `None` when the user was already subscribed.
    async fn subscribe(&self, email: &str) -> UserResult<Option<User>>;

    /// Set the position unless the user already holds it
    async fn set_position(&self, id: Uuid, position: Position) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| same_email(&u.email, &user.email)) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| same_email(&u.email, email)).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn subscribe(&self, email: &str) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        match users.values_mut().find(|u| same_email(&u.email, email)) {
            Some(user) if user.is_subscribed => Ok(None),
            Some(user) => {
                user.is_subscribed = true;
                Ok(Some(user.clone()))
            }
            None => {
                let user = User::subscriber(email);
                users.insert(user.id, user.clone());
                Ok(Some(user))
            }
        }
    }

    async fn set_position(&self, id: Uuid, position: Position) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(&id).and_then(|user| {
            if user.position == position {
                return None;
            }
            user.position = position;
            Some(user.clone())
        }))
    }
}
