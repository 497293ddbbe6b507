use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Email already taken")]
    DuplicateEmail,

    #[error("{0}")]
    Validation(String),

    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

/// Unique constraint violations on the two registration keys are business
/// failures, everything else stays a repository error.
impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UniqueViolation(UniqueField::Username) => Self::DuplicateUsername,
            RepositoryError::UniqueViolation(UniqueField::Email) => Self::DuplicateEmail,
            other => Self::Repository(other),
        }
    }
}

/// Column whose unique constraint rejected a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
    Other,
}

impl UniqueField {
    /// Resolve the column from the constraint named in a driver message:
    ///
    /// - SQLite: `UNIQUE constraint failed: users.username`
    /// - Postgres: `duplicate key value violates unique constraint "idx_users_email"`
    /// - MySQL: `Duplicate entry 'bob@x.com' for key 'users.idx_users_email'`
    ///
    /// Only the constraint identifier is inspected, never the rejected value.
    pub fn from_constraint_detail(detail: &str) -> Self {
        let detail = detail.to_ascii_lowercase();
        // MySQL echoes the rejected value before the key name
        let constraint = detail
            .rsplit_once(" for key ")
            .map_or(detail.as_str(), |(_, key)| key);

        if constraint.contains("idx_users_username") || constraint.contains("users.username") {
            Self::Username
        } else if constraint.contains("idx_users_email") || constraint.contains("users.email") {
            Self::Email
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Unique constraint violated on {0:?}")]
    UniqueViolation(UniqueField),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
