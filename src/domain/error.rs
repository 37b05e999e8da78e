use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User already exists.")]
    UserAlreadyExists,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}
