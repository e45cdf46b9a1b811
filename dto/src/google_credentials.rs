use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// OAuth credentials for Google APIs, as handed out by the token endpoint.
/// `expiry_date` is expressed in milliseconds since the Unix epoch.
#[derive(Serialize, Deserialize, Getters, PartialEq, Clone)]
pub struct GoogleCredentials {
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expiry_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

impl GoogleCredentials {
    pub fn new(access_token: String, refresh_token: Option<String>, expiry_date: Option<i64>) -> Self {
        Self {
            access_token,
            refresh_token,
            expiry_date,
            token_type: None,
            scope: None,
        }
    }

    pub fn with_token_type(mut self, token_type: Option<String>) -> Self {
        self.token_type = token_type;
        self
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }
}

impl Debug for GoogleCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GoogleCredentials {{access_token=MASKED, refresh_token={}, expiry_date={:?}}}",
            if self.refresh_token.is_some() { "MASKED" } else { "None" },
            self.expiry_date
        )
    }
}
