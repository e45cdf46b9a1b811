use crate::email::config::EmailConfig;
use crate::email::error::EmailError;
use crate::email::error::EmailError::{CantConnectToSmtpServer, CantSendMessage};
use dto::email::Email;
use log::{debug, error};
use mail_send::SmtpClientBuilder;
use mail_send::mail_builder::MessageBuilder;

/// Anything able to deliver an email.
/// The server holds one behind an `Arc`, so that tests can swap the SMTP relay for a fake.
#[rocket::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), EmailError>;
}

/// Sends emails through the configured SMTP relay, one connection per email.
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[rocket::async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<(), EmailError> {
        let message = create_message(&self.config, email);
        let smtp_server = self.config.smtp_server().as_str();
        let smtp_client = SmtpClientBuilder::new(smtp_server, *self.config.smtp_port())
            .implicit_tls(false)
            .credentials((
                self.config.smtp_login().as_str(),
                self.config.smtp_password().as_str(),
            ))
            .connect()
            .await;

        smtp_client
            .map_err(|e| {
                error!("Couldn't connect to SMTP server\n{e:#?}");
                CantConnectToSmtpServer(e.to_string())
            })?
            .send(message)
            .await
            .map_err(|e| {
                error!("Couldn't send message\n{e:#?}");
                CantSendMessage(e.to_string())
            })?;

        debug!("Email sent [recipient: {}]", email.recipient());
        Ok(())
    }
}

fn create_message<'a>(config: &'a EmailConfig, email: &'a Email) -> MessageBuilder<'a> {
    MessageBuilder::new()
        .from((config.sender_name().as_str(), config.sender_address().as_str()))
        .reply_to(config.reply_to_address())
        .to(email.recipient().as_str())
        .subject(email.subject().as_str())
        .html_body(email.html_body().as_str())
}
