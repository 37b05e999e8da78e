use crate::domain::models::user::UserId;

/// Source of fresh user identifiers
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> UserId;
}
