use async_trait::async_trait;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::{
    config::SmtpConfig,
    domain::{
        error::MailError,
        services::mail_service::{Mail, MailAddress, MailProvider},
    },
};

#[derive(Clone)]
pub struct SmtpMailProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailProvider {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| MailError::Delivery(e.to_string()))?
        } else {
            // plain connection, e.g. a local relay used in development
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        let mut builder = builder.port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }

    fn mailbox(address: &MailAddress) -> Result<Mailbox, MailError> {
        let email = address
            .email
            .parse::<Address>()
            .map_err(|e| MailError::InvalidAddress(format!("{}: {}", address.email, e)))?;
        Ok(Mailbox::new(Some(address.name.clone()), email))
    }

    fn build_message(mail: Mail) -> Result<Message, MailError> {
        Message::builder()
            .from(Self::mailbox(&mail.from)?)
            .to(Self::mailbox(&mail.to)?)
            .subject(mail.subject)
            .header(ContentType::TEXT_HTML)
            .body(mail.body)
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailProvider for SmtpMailProvider {
    async fn send_mail(&self, mail: Mail) -> Result<(), MailError> {
        let message = Self::build_message(mail)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?;

        tracing::debug!("mail handed to smtp relay");
        Ok(())
    }
}
