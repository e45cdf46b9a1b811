use crate::email::mailer::Mailer;
use derive_getters::Getters;
use dto::email::Email;
use dto::email_outcome::EmailOutcome;
use log::warn;
use rocket::tokio;
use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DispatchStatus {
    Delivered,
    PartiallyDelivered,
    Failed,
}

/// What became of the two emails sent for an appointment.
#[derive(Debug, Getters, Serialize, Clone, PartialEq)]
pub struct DispatchReport {
    user: EmailOutcome,
    admin: EmailOutcome,
}

impl DispatchReport {
    pub fn new(user: EmailOutcome, admin: EmailOutcome) -> Self {
        Self { user, admin }
    }

    pub fn status(&self) -> DispatchStatus {
        match (*self.user.sent(), *self.admin.sent()) {
            (true, true) => DispatchStatus::Delivered,
            (false, false) => DispatchStatus::Failed,
            _ => DispatchStatus::PartiallyDelivered,
        }
    }

    pub fn errors(&self) -> Vec<&str> {
        [&self.user, &self.admin]
            .into_iter()
            .filter_map(|outcome| outcome.error().as_deref())
            .collect()
    }
}

/// Send the applicant's confirmation and the admin notification concurrently.
/// Both sends always run to completion; one failing doesn't affect the other.
pub async fn dispatch_appointment_emails(
    mailer: &dyn Mailer,
    user_email: Email,
    admin_email: Email,
) -> DispatchReport {
    let (user, admin) = tokio::join!(
        send_and_track(mailer, user_email),
        send_and_track(mailer, admin_email)
    );
    DispatchReport::new(user, admin)
}

async fn send_and_track(mailer: &dyn Mailer, email: Email) -> EmailOutcome {
    match mailer.send(&email).await {
        Ok(()) => EmailOutcome::delivered(email.recipient().to_owned()),
        Err(error) => {
            warn!("Email has not been sent [recipient: {}, error: {error}]", email.recipient());
            EmailOutcome::failed(email.recipient().to_owned(), error.to_string())
        }
    }
}

/// Send a single, already assembled email.
pub async fn dispatch_email(mailer: &dyn Mailer, email: Email) -> EmailOutcome {
    send_and_track(mailer, email).await
}
