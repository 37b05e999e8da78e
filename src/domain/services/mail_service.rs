use async_trait::async_trait;

use crate::domain::error::MailError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddress {
    pub name: String,
    pub email: String,
}

impl MailAddress {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Outgoing message. `body` may contain HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub to: MailAddress,
    pub from: MailAddress,
    pub subject: String,
    pub body: String,
}

/// Service for delivering mail
#[async_trait]
pub trait MailProvider {
    async fn send_mail(&self, mail: Mail) -> Result<(), MailError>;
}
