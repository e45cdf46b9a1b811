use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("The session token is not valid base64.")]
    NotBase64,
    #[error("The session token doesn't contain valid UTF-8.")]
    NotUtf8,
    #[error("The session token doesn't match the `username:timestamp` format.")]
    MalformedToken,
    #[error("The session token timestamp `{0}` is not a number.")]
    InvalidTimestamp(String),
}
