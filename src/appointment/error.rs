use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Some required fields are missing: {0:?}")]
    MissingFields(Vec<&'static str>),
    #[error("The date `{0}` doesn't match the YYYY-MM-DD format.")]
    InvalidDate(String),
    #[error("The time `{0}` doesn't match the HH:MM format.")]
    InvalidTime(String),
}

impl ValidationError {
    /// Field names to report back to the caller.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            ValidationError::MissingFields(fields) => fields.clone(),
            ValidationError::InvalidDate(_) => vec!["date"],
            ValidationError::InvalidTime(_) => vec!["time"],
        }
    }
}
