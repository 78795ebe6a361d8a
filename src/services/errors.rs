use thiserror::Error;

use crate::forms::{FieldError, FormError};
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Request-level problem with a message safe to show the caller.
    #[error("{0}")]
    Form(String),

    #[error("invalid form data")]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Validation(errors) => ServiceError::Validation(errors),
            FormError::MissingStatus => ServiceError::Form(err.to_string()),
            FormError::UnknownStatus(status) => ServiceError::Form(format!(
                "Unknown status \"{status}\"; expected pending, contacted or resolved"
            )),
        }
    }
}
