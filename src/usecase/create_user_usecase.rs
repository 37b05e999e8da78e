use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    models::user::{User, UserProps},
    repositories::user_repository::UserRepository,
    services::{
        id_service::IdGenerator,
        mail_service::{Mail, MailAddress, MailProvider},
    },
};

const WELCOME_FROM_NAME: &str = "Equipe do Meu App";
const WELCOME_FROM_EMAIL: &str = "equipe@meuapp.com";
const WELCOME_SUBJECT: &str = "Seja bem-vindo à plataforma";
const WELCOME_BODY: &str = "<p>Você já pode fazer login em nossa plataforma.</p>";

/// Data needed to open an account. Field contents are trusted as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Registers an account and sends the welcome mail.
///
/// The duplicate check and the save are separate repository calls, so two
/// overlapping requests for the same email can both succeed. Saving and
/// mailing are not atomic either: a mail failure is reported after the
/// account has been stored.
pub struct CreateUserUsecase<R: UserRepository, M: MailProvider, G: IdGenerator> {
    user_repository: R,
    mail_provider: M,
    id_generator: G,
}

impl<R: UserRepository, M: MailProvider, G: IdGenerator> CreateUserUsecase<R, M, G> {
    pub fn new(user_repository: R, mail_provider: M, id_generator: G) -> Self {
        Self {
            user_repository,
            mail_provider,
            id_generator,
        }
    }

    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn execute(&self, request: CreateUserRequest) -> Result<(), DomainError>
    where
        R: Send + Sync,
        M: Send + Sync,
    {
        let already_exists = self
            .user_repository
            .find_by_email(&request.email)
            .await?
            .is_some();

        if already_exists {
            tracing::warn!("account already registered");
            return Err(DomainError::UserAlreadyExists);
        }

        let CreateUserRequest {
            name,
            email,
            password,
        } = request;

        let to = MailAddress::new(name.clone(), email.clone());
        let user = User::new(
            UserProps {
                name,
                email,
                password,
            },
            None,
            &self.id_generator,
        );

        self.user_repository.save(&user).await?;
        tracing::info!(user_id = %user.id(), "account created");

        self.mail_provider
            .send_mail(Mail {
                to,
                from: MailAddress::new(WELCOME_FROM_NAME, WELCOME_FROM_EMAIL),
                subject: WELCOME_SUBJECT.to_string(),
                body: WELCOME_BODY.to_string(),
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use rstest::*;

    use super::*;
    use crate::{
        domain::{
            error::{MailError, RepositoryError},
            models::user::UserId,
        },
        infrastructure::in_memory_user_repository::InMemoryUserRepository,
    };

    // mail provider that records every message instead of sending it
    #[derive(Clone, Default)]
    struct RecordingMailProvider {
        sent: Arc<Mutex<Vec<Mail>>>,
    }

    impl RecordingMailProvider {
        fn sent(&self) -> Vec<Mail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MailProvider for RecordingMailProvider {
        async fn send_mail(&self, mail: Mail) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(mail);
            Ok(())
        }
    }

    #[derive(Clone)]
    struct FailingMailProvider;

    #[async_trait]
    impl MailProvider for FailingMailProvider {
        async fn send_mail(&self, _mail: Mail) -> Result<(), MailError> {
            Err(MailError::Delivery("smtp unavailable".to_string()))
        }
    }

    // repository whose save always fails, counting every call
    #[derive(Clone, Default)]
    struct FailingSaveRepository {
        saves: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl UserRepository for FailingSaveRepository {
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, RepositoryError> {
            Ok(None)
        }

        async fn save(&self, _user: &User) -> Result<(), RepositoryError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Err(RepositoryError::DatabaseError("disk full".to_string()))
        }
    }

    struct SequentialIdGenerator(AtomicUsize);

    impl IdGenerator for SequentialIdGenerator {
        fn generate(&self) -> UserId {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            UserId::new(format!("user-{}", n))
        }
    }

    fn ids() -> SequentialIdGenerator {
        SequentialIdGenerator(AtomicUsize::new(1))
    }

    #[fixture]
    fn ana() -> CreateUserRequest {
        CreateUserRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_positive(ana: CreateUserRequest) {
        let repository = InMemoryUserRepository::new();
        let mailer = RecordingMailProvider::default();
        let usecase = CreateUserUsecase::new(repository.clone(), mailer.clone(), ids());

        usecase.execute(ana).await.unwrap();

        let users = repository.users().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id().as_str(), "user-1");
        assert_eq!(users[0].name, "Ana");
        assert_eq!(users[0].email, "ana@example.com");
        assert_eq!(users[0].password, "secret");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, MailAddress::new("Ana", "ana@example.com"));
        assert_eq!(sent[0].from, MailAddress::new("Equipe do Meu App", "equipe@meuapp.com"));
        assert_eq!(sent[0].subject, "Seja bem-vindo à plataforma");
        assert_eq!(
            sent[0].body,
            "<p>Você já pode fazer login em nossa plataforma.</p>"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_duplicated_email_negative(ana: CreateUserRequest) {
        let repository = InMemoryUserRepository::new();
        let mailer = RecordingMailProvider::default();
        let usecase = CreateUserUsecase::new(repository.clone(), mailer.clone(), ids());

        usecase.execute(ana.clone()).await.unwrap();
        let result = usecase.execute(ana).await;

        assert!(matches!(result, Err(DomainError::UserAlreadyExists)));
        assert_eq!(repository.users().await.len(), 1);
        // only the first call sent a welcome mail
        assert_eq!(mailer.sent().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_existing_account_skips_side_effects(ana: CreateUserRequest) {
        let existing = User::reconstruct(
            UserId::new("existing"),
            UserProps {
                name: "Someone else".to_string(),
                email: ana.email.clone(),
                password: "other".to_string(),
            },
        );
        let repository = InMemoryUserRepository::with_users(vec![existing.clone()]);
        let mailer = RecordingMailProvider::default();
        let usecase = CreateUserUsecase::new(repository.clone(), mailer.clone(), ids());

        let result = usecase.execute(ana).await;

        assert!(matches!(result, Err(DomainError::UserAlreadyExists)));
        assert_eq!(repository.users().await, vec![existing]);
        assert!(mailer.sent().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_save_failure_negative(ana: CreateUserRequest) {
        let repository = FailingSaveRepository::default();
        let mailer = RecordingMailProvider::default();
        let usecase = CreateUserUsecase::new(repository.clone(), mailer.clone(), ids());

        let result = usecase.execute(ana).await;

        assert!(matches!(
            result,
            Err(DomainError::Repository(RepositoryError::DatabaseError(_)))
        ));
        assert_eq!(repository.saves.load(Ordering::SeqCst), 1);
        assert!(mailer.sent().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_mail_failure_keeps_account(ana: CreateUserRequest) {
        let repository = InMemoryUserRepository::new();
        let usecase = CreateUserUsecase::new(repository.clone(), FailingMailProvider, ids());

        let result = usecase.execute(ana).await;

        assert!(matches!(
            result,
            Err(DomainError::Mail(MailError::Delivery(_)))
        ));
        // the account was stored before delivery was attempted
        let stored = repository.find_by_email("ana@example.com").await.unwrap();
        assert!(stored.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_distinct_emails_get_distinct_ids() {
        let repository = InMemoryUserRepository::new();
        let mailer = RecordingMailProvider::default();
        let usecase = CreateUserUsecase::new(repository.clone(), mailer.clone(), ids());

        for i in 0..3 {
            let request = CreateUserRequest {
                name: format!("user {}", i),
                email: format!("user{}@example.com", i),
                password: "secret".to_string(),
            };
            usecase.execute(request).await.unwrap();
        }

        let ids: Vec<String> = repository
            .users()
            .await
            .iter()
            .map(|user| user.id().to_string())
            .collect();
        assert_eq!(ids, vec!["user-1", "user-2", "user-3"]);
        assert_eq!(mailer.sent().len(), 3);
    }
}
