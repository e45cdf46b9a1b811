use crate::email::error::EmailError;
use crate::email::error::EmailError::{
    MissingAdminEmail, MissingEmailSenderAddress, MissingEmailSenderName, MissingSmtpLogin,
    MissingSmtpPassword,
};
use crate::tools::env_args::{
    retrieve_arg_value, retrieve_arg_value_or, retrieve_expected_arg_value,
    retrieve_parsed_arg_value,
};
use derive_getters::Getters;
use std::fmt::{Debug, Formatter};

const EMAIL_SENDER_NAME_ARG: &str = "--email-sender-name";
const EMAIL_SENDER_ADDRESS_ARG: &str = "--email-sender-address";
const REPLY_TO_ARG: &str = "--reply-to";
const ADMIN_EMAIL_ARG: &str = "--admin-email";
const SMTP_SERVER_ARG: &str = "--smtp-server";
const SMTP_PORT_ARG: &str = "--smtp-port";
const SMTP_LOGIN_ARG: &str = "--smtp-login";
const SMTP_PASSWORD_ARG: &str = "--smtp-password";
const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Getters, Clone, PartialEq)]
pub struct EmailConfig {
    smtp_server: String,
    smtp_port: u16,
    smtp_login: String,
    smtp_password: String,
    sender_name: String,
    sender_address: String,
    reply_to: Option<String>,
    admin_email: String,
}

impl EmailConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        smtp_server: String,
        smtp_port: u16,
        smtp_login: String,
        smtp_password: String,
        sender_name: String,
        sender_address: String,
        reply_to: Option<String>,
        admin_email: String,
    ) -> Self {
        Self {
            smtp_server,
            smtp_port,
            smtp_login,
            smtp_password,
            sender_name,
            sender_address,
            reply_to,
            admin_email,
        }
    }

    pub fn from_args() -> Result<Self, EmailError> {
        Ok(Self::new(
            retrieve_arg_value_or(SMTP_SERVER_ARG, DEFAULT_SMTP_SERVER),
            retrieve_parsed_arg_value(SMTP_PORT_ARG, DEFAULT_SMTP_PORT),
            retrieve_expected_arg_value(SMTP_LOGIN_ARG, MissingSmtpLogin)?,
            retrieve_expected_arg_value(SMTP_PASSWORD_ARG, MissingSmtpPassword)?,
            retrieve_expected_arg_value(EMAIL_SENDER_NAME_ARG, MissingEmailSenderName)?,
            retrieve_expected_arg_value(EMAIL_SENDER_ADDRESS_ARG, MissingEmailSenderAddress)?,
            retrieve_arg_value(REPLY_TO_ARG),
            retrieve_expected_arg_value(ADMIN_EMAIL_ARG, MissingAdminEmail)?,
        ))
    }

    /// Where answers should go: the reply-to address if any, the sender otherwise.
    pub fn reply_to_address(&self) -> &str {
        self.reply_to.as_deref().unwrap_or(&self.sender_address)
    }
}

impl Debug for EmailConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EmailConfig {{smtp_server={}, smtp_port={}, smtp_login={}, smtp_password=MASKED, sender_address={}, admin_email={}}}",
            self.smtp_server, self.smtp_port, self.smtp_login, self.sender_address, self.admin_email
        )
    }
}
