use thiserror::Error;

use super::password::HashError;
use super::token::TokenError;

/// Failures of the persistence contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("record already exists")]
    AlreadyExists,
    #[error("record not found")]
    NotFound,
    #[error("storage failure: {0}")]
    Db(String),
}

impl From<models::errors::ModelError> for StorageError {
    fn from(e: models::errors::ModelError) -> Self {
        use models::errors::ModelError;
        match e {
            ModelError::Duplicate(_) => StorageError::AlreadyExists,
            ModelError::Validation(msg) | ModelError::Db(msg) => StorageError::Db(msg),
        }
    }
}

/// Business errors for auth workflows.
///
/// The first four variants are caller mistakes and are safe to report back.
/// Everything else is an internal failure: log it, answer with an opaque error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("user already exists")]
    UserExists,
    /// Unknown email and wrong password both end up here.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user not found")]
    UnknownAccount,
    #[error("application {0} is not provisioned")]
    UnknownApplication(i32),
    #[error("hashing error: {0}")]
    Hash(#[from] HashError),
    #[error("token error: {0}")]
    Token(#[from] TokenError),
    #[error("repository error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::InvalidInput(_) => 1001,
            AuthError::UserExists => 1002,
            AuthError::UnknownAccount => 1003,
            AuthError::InvalidCredentials => 1004,
            AuthError::UnknownApplication(_) => 1005,
            AuthError::Hash(_) => 1101,
            AuthError::Token(_) => 1102,
            AuthError::Storage(_) => 1200,
        }
    }

    pub fn is_internal(&self) -> bool {
        !matches!(
            self,
            AuthError::InvalidInput(_) | AuthError::UserExists | AuthError::InvalidCredentials | AuthError::UnknownAccount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(!AuthError::InvalidCredentials.is_internal());
        assert!(!AuthError::UnknownAccount.is_internal());
        assert!(AuthError::UnknownApplication(7).is_internal());
        assert!(AuthError::Storage(StorageError::Db("boom".into())).is_internal());
        assert_eq!(AuthError::InvalidCredentials.code(), 1004);
    }

    #[test]
    fn duplicate_model_error_means_already_exists() {
        let e: StorageError = models::errors::ModelError::Duplicate("users.email".into()).into();
        assert_eq!(e, StorageError::AlreadyExists);
        let e: StorageError = models::errors::ModelError::Db("conn reset".into()).into();
        assert_eq!(e, StorageError::Db("conn reset".into()));
    }
}
