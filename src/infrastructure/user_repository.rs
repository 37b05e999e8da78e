use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Schema,
};

use crate::{
    domain::{
        error::RepositoryError,
        models::user::{User, UserId, UserProps},
        repositories::user_repository::UserRepository,
    },
    infrastructure::entity::users,
};

#[cfg_attr(not(test), derive(Clone))]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the `users` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        let backend = self.db.get_database_backend();
        let mut table = Schema::new(backend).create_table_from_entity(users::Entity);
        table.if_not_exists();

        self.db
            .execute(backend.build(&table))
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(user.map(|model| {
            User::reconstruct(
                UserId::new(model.id),
                UserProps {
                    name: model.name,
                    email: model.email,
                    password: model.password,
                },
            )
        }))
    }

    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let user_model = users::ActiveModel {
            id: Set(user.id().as_str().to_string()),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password: Set(user.password.clone()),
        };

        users::Entity::insert(user_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        tracing::debug!(user_id = %user.id(), "user row inserted");
        Ok(())
    }
}
