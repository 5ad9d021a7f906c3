use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Custom(String),
}

impl RepositoryError {
    /// The message reported by the backing store, without our own prefix.
    pub fn backend_message(&self) -> String {
        match self {
            RepositoryError::Sqlx(SqlxError::Database(db_err)) => db_err.message().to_string(),
            RepositoryError::Sqlx(err) => err.to_string(),
            RepositoryError::NotFound => "Order not found".to_string(),
            RepositoryError::Custom(msg) => msg.clone(),
        }
    }
}
