use sql_connection::{PgError, PoolError, SqlState};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Database error: {0}")]
    Database(PgError),
    #[error("Database Pool error: {0}")]
    DatabasePool(#[from] PoolError),
    #[error("Email already exists")]
    EmailExists,
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<PgError> for UserError {
    fn from(err: PgError) -> Self {
        if err.code() == Some(&SqlState::UNIQUE_VIOLATION) {
            return Self::EmailExists;
        }
        Self::Database(err)
    }
}
