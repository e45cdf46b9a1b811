use crate::appointment::config::AppointmentConfig;
use crate::appointment::error::ValidationError;
use crate::appointment::{meeting_request, validate};
use crate::email::config::EmailConfig;
use crate::email::dispatch::{DispatchStatus, dispatch_appointment_emails};
use crate::email::mailer::Mailer;
use crate::email::templates::EmailTemplates;
use crate::google::config::GoogleConfig;
use crate::tools::log_error_and_return;
use crate::web::api::calendar_controller::schedule;
use crate::web::api::google_controller::resolve_credentials;
use crate::web::error::error_response;
use dto::appointment_request::AppointmentRequest;
use log::{info, warn};
use rocket::State;
use rocket::http::{CookieJar, Status};
use rocket::serde::json::{Json, Value, json};
use std::sync::Arc;

/// Book an interview: validate the form, create the Meet event,
/// then email the applicant and the recruiting team at the same time.
#[allow(clippy::too_many_arguments)]
#[post("/appointments", format = "application/json", data = "<request>")]
pub async fn create_appointment(
    google_config: &State<GoogleConfig>,
    email_config: &State<EmailConfig>,
    appointment_config: &State<AppointmentConfig>,
    templates: &State<EmailTemplates>,
    mailer: &State<Arc<dyn Mailer>>,
    cookie_jar: &CookieJar<'_>,
    request: Json<AppointmentRequest>,
) -> (Status, Value) {
    let mut request = request.into_inner();
    let appointment = match validate(&request) {
        Ok(appointment) => appointment,
        Err(error) => return validation_failure(error),
    };

    let credentials = resolve_credentials(request.take_credentials(), cookie_jar);
    let meeting_request = match meeting_request(&appointment, appointment_config) {
        Ok(meeting_request) => meeting_request,
        Err(error) => return validation_failure(error),
    };
    let (meeting, credentials) =
        match schedule(google_config, cookie_jar, credentials, &meeting_request).await {
            Ok(scheduled) => scheduled,
            Err(response) => return response,
        };
    info!(
        "Interview scheduled [event_id: {}, store: {}]",
        meeting.event_id(),
        appointment.store()
    );

    let emails = templates
        .confirmation_email(&appointment, &meeting)
        .and_then(|user_email| {
            let admin_email = templates.admin_notification_email(
                &appointment,
                &meeting,
                email_config.admin_email(),
            )?;
            Ok((user_email, admin_email))
        });
    let (user_email, admin_email) = match emails {
        Ok(emails) => emails,
        Err(error) => {
            return log_error_and_return(error_response(
                Status::InternalServerError,
                "The emails could not be rendered",
                json!({"meeting": meeting, "credentials": credentials, "reason": error.to_string()}),
            ))(error);
        }
    };

    let report = dispatch_appointment_emails(mailer.inner().as_ref(), user_email, admin_email).await;
    if report.status() != DispatchStatus::Delivered {
        warn!("Some appointment emails were not sent [errors: {:?}]", report.errors());
    }
    let body = json!({
        "meeting": meeting,
        "emails": report,
        "credentials": credentials,
    });
    match report.status() {
        DispatchStatus::Delivered => (Status::Ok, body),
        DispatchStatus::PartiallyDelivered => (Status::MultiStatus, body),
        DispatchStatus::Failed => error_response(
            Status::InternalServerError,
            "No email could be sent",
            body,
        ),
    }
}

fn validation_failure(error: ValidationError) -> (Status, Value) {
    let message = match error {
        ValidationError::MissingFields(_) => "Missing required fields",
        ValidationError::InvalidDate(_) | ValidationError::InvalidTime(_) => {
            "Invalid date or time"
        }
    };
    error_response(Status::BadRequest, message, error.fields())
}
