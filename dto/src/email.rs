use derive_getters::Getters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Getters, Serialize, Deserialize, Clone, PartialEq)]
pub struct Email {
    recipient: String,
    subject: String,
    html_body: String,
}

impl Email {
    pub fn new(recipient: String, subject: String, html_body: String) -> Self {
        Self {
            recipient,
            subject,
            html_body,
        }
    }
}
