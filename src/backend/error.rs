use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BackendError {
    #[error("Backend URL is missing. Please use `--backend-url=` argument to provide one.")]
    MissingBackendUrl,
    #[error("The backend URL `{0}` can't be used to build requests.")]
    InvalidUrl(String),
    #[error("The backend can't be reached: {0}")]
    ConnectionFailed(String),
    #[error("The backend refused the credentials.")]
    WrongCredentials,
    #[error("`{0}` is not a resource the backend exposes.")]
    UnknownResource(String),
}
