use crate::errors::{repository::RepositoryError, validation::FieldViolations};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Validation failed: {0}")]
    Validation(#[from] FieldViolations),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Text shown to the user in a notification.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Repo(err) => err.backend_message(),
            ServiceError::Validation(violations) => violations.to_string(),
            ServiceError::Internal(msg) => msg.clone(),
        }
    }
}
