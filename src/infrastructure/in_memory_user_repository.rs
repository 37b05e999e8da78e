use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    error::RepositoryError, models::user::User, repositories::user_repository::UserRepository,
};

/// Process-local storage. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Snapshot of every stored user, in insertion order.
    pub async fn users(&self) -> Vec<User> {
        self.users.read().await.clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        tracing::debug!(user_id = %user.id(), "storing user in memory");
        self.users.write().await.push(user.clone());
        Ok(())
    }
}
