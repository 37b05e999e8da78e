use crate::domain::services::id_service::IdGenerator;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);
impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every field of a [`User`] except its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProps {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A registered account.
///
/// `id` is fixed at construction and only readable afterwards. The other
/// fields stay public; nothing in this crate mutates them once the user
/// has been handed to a repository.
///
/// `password` holds exactly what the caller supplied. Hash credentials
/// before they reach this type in any real deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Builds a user from `props`, keeping `id` when given and asking
    /// `id_generator` for a fresh one otherwise.
    pub fn new<G: IdGenerator + ?Sized>(
        props: UserProps,
        id: Option<UserId>,
        id_generator: &G,
    ) -> Self {
        let id = id.unwrap_or_else(|| id_generator.generate());
        Self::reconstruct(id, props)
    }

    /// Rebuilds a user that already has an identifier, e.g. one read back from storage.
    pub fn reconstruct(id: UserId, props: UserProps) -> Self {
        let UserProps {
            name,
            email,
            password,
        } = props;
        Self {
            id,
            name,
            email,
            password,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }
}
