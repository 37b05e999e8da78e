use crate::domain::{error::RepositoryError, models::user::User};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository {
    /// `Ok(None)` when no account uses `email`.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    async fn save(&self, user: &User) -> Result<(), RepositoryError>;
}
