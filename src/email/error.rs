use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum EmailError {
    #[error("Missing email sender name")]
    MissingEmailSenderName,
    #[error("Missing email sender address")]
    MissingEmailSenderAddress,
    #[error("Missing SMTP login")]
    MissingSmtpLogin,
    #[error("Missing SMTP password")]
    MissingSmtpPassword,
    #[error("Missing administrator email address")]
    MissingAdminEmail,
    #[error("Can't connect to SMTP server: {0}")]
    CantConnectToSmtpServer(String),
    #[error("Can't send message: {0}")]
    CantSendMessage(String),
    #[error("Can't load email templates: {0}")]
    CantLoadTemplates(String),
    #[error("Can't render email template: {0}")]
    CantRenderTemplate(String),
}
