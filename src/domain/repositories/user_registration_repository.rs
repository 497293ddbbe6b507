use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::user::{Email, NewUser, User, Username},
};

/// Repository for user registration.
///
/// Every lookup and write of a registration goes through one
/// [`RegistrationTransaction`], so the uniqueness checks and the insert are a
/// single unit of work.
#[async_trait]
pub trait UserRegistrationRepository {
    type Transaction: RegistrationTransaction;

    /// Begin a new unit of work
    async fn begin(&self) -> Result<Self::Transaction, RepositoryError>;
}

/// Open unit of work. Dropping it without [`commit`](Self::commit) rolls back
/// everything written through it.
#[async_trait]
pub trait RegistrationTransaction: Send + Sync + Sized {
    async fn exists_by_username(&self, username: &Username) -> Result<bool, RepositoryError>;

    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError>;

    /// Insert the user and return it with its assigned id.
    /// A unique index rejecting the row is reported as
    /// [`RepositoryError::UniqueViolation`].
    async fn save(&self, user: NewUser) -> Result<User, RepositoryError>;

    async fn commit(self) -> Result<(), RepositoryError>;
}
