use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::{
        credential::PlainPassword,
        user::{Email, NewUser, User, Username},
    },
    repositories::user_registration_repository::{
        RegistrationTransaction, UserRegistrationRepository,
    },
    services::password_service::PasswordHasher,
};

/// Input of a registration
#[derive(Debug)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: PlainPassword,
}

/// Public view of a freshly registered user. Carries no password material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&User> for RegistrationResponse {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            username: user.username().as_str().to_string(),
            email: user.email().as_str().to_string(),
        }
    }
}

pub struct RegisterUserUsecase<R: UserRegistrationRepository, P: PasswordHasher> {
    registration_repository: R,
    password_hasher: P,
}

impl<R: UserRegistrationRepository, P: PasswordHasher> RegisterUserUsecase<R, P> {
    pub fn new(registration_repository: R, password_hasher: P) -> Self {
        Self {
            registration_repository,
            password_hasher,
        }
    }

    /// Uniqueness checks, hashing and insert run inside one transaction.
    /// Returning early drops the transaction, which rolls it back.
    pub async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationResponse, DomainError>
    where
        R: Send + Sync,
        P: Send + Sync + 'static,
    {
        let username = Username::new(request.username)?;
        let email = Email::new(request.email)?;

        let txn = self.registration_repository.begin().await?;

        if txn.exists_by_username(&username).await? {
            warn!(username = username.as_str(), "registration rejected: username taken");
            return Err(DomainError::DuplicateUsername);
        }
        if txn.exists_by_email(&email).await? {
            warn!(username = username.as_str(), "registration rejected: email taken");
            return Err(DomainError::DuplicateEmail);
        }

        // Argon2 is CPU and memory bound, keep it off the async workers
        let password_hasher = self.password_hasher.clone();
        let password = request.password;
        let password_hash =
            tokio::task::spawn_blocking(move || password_hasher.hash(password.as_str()))
                .await
                .map_err(|e| DomainError::PasswordHashing(e.to_string()))??;

        // A concurrent registration can still win between the checks above and
        // this insert; the unique index turns that into a duplicate error.
        let user = txn
            .save(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;
        txn.commit().await?;

        info!(
            user_id = %user.id(),
            username = user.username().as_str(),
            created_at = %user.created_at(),
            "user registered"
        );

        Ok(RegistrationResponse::from(&user))
    }
}
