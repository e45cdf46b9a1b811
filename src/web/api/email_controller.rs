use crate::email::dispatch::dispatch_email;
use crate::email::mailer::Mailer;
use crate::session::Session;
use crate::web::error::error_response;
use dto::email::Email;
use rocket::State;
use rocket::http::Status;
use rocket::serde::json::{Json, Value, json};
use std::sync::Arc;

/// Send a single hand-assembled email. Only a logged-in admin may do so.
#[post("/emails", format = "application/json", data = "<email>")]
pub async fn send_email(
    mailer: &State<Arc<dyn Mailer>>,
    _session: Session,
    email: Json<Email>,
) -> (Status, Value) {
    let email = email.into_inner();
    if email.recipient().trim().is_empty() {
        return error_response(Status::BadRequest, "A recipient is required", vec!["recipient"]);
    }

    let outcome = dispatch_email(mailer.inner().as_ref(), email).await;
    if *outcome.sent() {
        (Status::Ok, json!(outcome))
    } else {
        error_response(Status::InternalServerError, "The email could not be sent", outcome)
    }
}
