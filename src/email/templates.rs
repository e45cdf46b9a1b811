use crate::appointment::ValidAppointment;
use crate::email::error::EmailError;
use crate::email::error::EmailError::{CantLoadTemplates, CantRenderTemplate};
use dto::email::Email;
use dto::meeting::Meeting;
use log::error;
use tera::{Context, Tera};

pub const TEMPLATES_GLOB: &str = "public/templates/email/*.html.tera";
const CONFIRMATION_TEMPLATE: &str = "appointment-confirmation.html.tera";
const NOTIFICATION_TEMPLATE: &str = "appointment-notification.html.tera";
const CONFIRMATION_SUBJECT: &str = "Confirmación de tu entrevista";
const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M";

/// Renders the HTML emails sent once an appointment is booked.
pub struct EmailTemplates {
    tera: Tera,
}

impl EmailTemplates {
    pub fn load(glob: &str) -> Result<Self, EmailError> {
        let mut tera = Tera::new(glob).map_err(|error| {
            error!("Can't load email templates [glob: {glob}]\n{error:#?}");
            CantLoadTemplates(error.to_string())
        })?;
        tera.autoescape_on(vec![".html.tera"]);
        Ok(Self { tera })
    }

    /// Email for the applicant, with the meeting link.
    pub fn confirmation_email(
        &self,
        appointment: &ValidAppointment,
        meeting: &Meeting,
    ) -> Result<Email, EmailError> {
        let body = self.render(CONFIRMATION_TEMPLATE, appointment, meeting)?;
        Ok(Email::new(
            appointment.email().to_owned(),
            CONFIRMATION_SUBJECT.to_owned(),
            body,
        ))
    }

    /// Email for the recruiting team, with every detail the applicant filled in.
    pub fn admin_notification_email(
        &self,
        appointment: &ValidAppointment,
        meeting: &Meeting,
        admin_email: &str,
    ) -> Result<Email, EmailError> {
        let body = self.render(NOTIFICATION_TEMPLATE, appointment, meeting)?;
        let subject = format!(
            "Nueva entrevista agendada: {} ({})",
            appointment.name(),
            appointment.store()
        );
        Ok(Email::new(admin_email.to_owned(), subject, body))
    }

    fn render(
        &self,
        template_name: &str,
        appointment: &ValidAppointment,
        meeting: &Meeting,
    ) -> Result<String, EmailError> {
        let context = create_context(appointment, meeting);
        self.tera.render(template_name, &context).map_err(|error| {
            error!("Can't render email template [template: {template_name}]\n{error:#?}");
            CantRenderTemplate(error.to_string())
        })
    }
}

fn create_context(appointment: &ValidAppointment, meeting: &Meeting) -> Context {
    let mut context = Context::new();
    context.insert("name", appointment.name());
    context.insert("email", appointment.email());
    context.insert("phone", appointment.phone());
    context.insert("date", &appointment.date().format(DATE_FORMAT).to_string());
    context.insert("time", &appointment.time().format(TIME_FORMAT).to_string());
    context.insert("store", appointment.store());
    context.insert("market", appointment.market());
    context.insert("notes", appointment.notes());
    context.insert("meet_link", meeting.meet_link());
    context.insert("event_link", meeting.html_link());
    context
}
