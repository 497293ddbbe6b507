use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::{
    error::{RepositoryError, UniqueField},
    models::user::{Email, NewUser, User, Username},
    repositories::user_registration_repository::{
        RegistrationTransaction, UserRegistrationRepository,
    },
};
use entity::users;

#[derive(Clone)]
pub struct SeaOrmUserRegistrationRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRegistrationRepository for SeaOrmUserRegistrationRepository {
    type Transaction = SeaOrmRegistrationTransaction;

    async fn begin(&self) -> Result<Self::Transaction, RepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(SeaOrmRegistrationTransaction { txn })
    }
}

/// sea-orm rolls the transaction back when it is dropped uncommitted
pub struct SeaOrmRegistrationTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl RegistrationTransaction for SeaOrmRegistrationTransaction {
    async fn exists_by_username(&self, username: &Username) -> Result<bool, RepositoryError> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username.as_str()))
            .count(&self.txn)
            .await
            .map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .count(&self.txn)
            .await
            .map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn save(&self, user: NewUser) -> Result<User, RepositoryError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let user_model = users::ActiveModel {
            id: Set(id),
            username: Set(user.username.as_str().to_string()),
            email: Set(user.email.as_str().to_string()),
            password_hash: Set(user.password_hash.as_str().to_string()),
            created_at: Set(now),
        };

        users::Entity::insert(user_model)
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(User::reconstruct(
            id,
            user.username,
            user.email,
            user.password_hash,
            now,
        ))
    }

    async fn commit(self) -> Result<(), RepositoryError> {
        self.txn.commit().await.map_err(map_db_err)
    }
}

fn map_db_err(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            RepositoryError::UniqueViolation(UniqueField::from_constraint_detail(&detail))
        }
        _ => RepositoryError::DatabaseError(err.to_string()),
    }
}
