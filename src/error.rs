use crate::backend::error::BackendError;
use crate::email::error::EmailError;
use crate::google::error::GoogleError;
use crate::web::error::WebError;
use thiserror::Error;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Error while working with Google.")]
    Google(#[from] GoogleError),
    #[error("Error while preparing or sending emails.")]
    Email(#[from] EmailError),
    #[error("Error while working with the backend.")]
    Backend(#[from] BackendError),
    #[error("An error has been encountered while executing requests onto another server.")]
    Web(#[from] WebError),
}
