use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Error taxonomy shared by every catalog workflow.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::AlreadyExists(_) => 2001,
            ServiceError::InvalidArguments(_) => 2002,
            ServiceError::NotFound(_) => 2003,
            ServiceError::AccessDenied(_) => 2004,
            ServiceError::Internal(_) => 2100,
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => return ServiceError::AlreadyExists(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return ServiceError::InvalidArguments(msg),
            _ => {}
        }
        match err {
            DbErr::RecordNotFound(msg) => ServiceError::NotFound(msg),
            DbErr::RecordNotUpdated => ServiceError::NotFound("record not updated".into()),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(err: models::errors::ModelError) -> Self {
        match err {
            models::errors::ModelError::Validation(msg) => ServiceError::InvalidArguments(msg),
        }
    }
}
