use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GoogleError {
    #[error("Missing Google client id")]
    MissingClientId,
    #[error("Missing Google client secret")]
    MissingClientSecret,
    #[error("Missing Google redirect URI")]
    MissingRedirectUri,
    #[error("Google endpoint is not a valid URL [endpoint: {0}]")]
    InvalidEndpoint(String),
    #[error("The connection to Google failed: {0}")]
    ConnectionFailed(String),
    #[error("Google refused the token request [status: {status}]: {details}")]
    TokenRequestRejected { status: u16, details: String },
    #[error("The access token has expired and no refresh token is available")]
    MissingRefreshToken,
    #[error("Google Calendar refused the request [status: {status}]: {details}")]
    CalendarRequestRejected { status: u16, details: String },
    #[error("Google answered with an unexpected payload: {0}")]
    MalformedResponse(String),
    #[error("The created event has no video entry point [event: {0}]")]
    MissingMeetLink(String),
}
