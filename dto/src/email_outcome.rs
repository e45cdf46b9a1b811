use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Whether one email reached the SMTP relay.
#[derive(Debug, Getters, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmailOutcome {
    recipient: String,
    sent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl EmailOutcome {
    pub fn delivered(recipient: String) -> Self {
        Self {
            recipient,
            sent: true,
            error: None,
        }
    }

    pub fn failed(recipient: String, error: String) -> Self {
        Self {
            recipient,
            sent: false,
            error: Some(error),
        }
    }
}
