use crate::appointment::config::AppointmentConfig;
use crate::google::calendar;
use crate::google::config::GoogleConfig;
use crate::google::error::GoogleError;
use crate::tools::log_error_and_return;
use crate::tools::web::build_client;
use crate::web::api::google_controller::{resolve_credentials, update_credentials};
use crate::web::error::error_response;
use chrono::{NaiveDateTime, Utc};
use dto::google_credentials::GoogleCredentials;
use dto::meeting::{Attendee, Meeting, MeetingRequest};
use log::debug;
use rocket::State;
use rocket::http::{CookieJar, Status};
use rocket::serde::json::{Json, Value, json};

const MEET_LINK_SUMMARY: &str = "Reunión promotoras";
const UTC: &str = "UTC";

/// Create a meeting from a fully described request.
#[post("/calendar/meetings", format = "application/json", data = "<meeting_request>")]
pub async fn create_meeting(
    google_config: &State<GoogleConfig>,
    cookie_jar: &CookieJar<'_>,
    meeting_request: Json<MeetingRequest>,
) -> (Status, Value) {
    let mut meeting_request = meeting_request.into_inner();
    let credentials = resolve_credentials(meeting_request.take_credentials(), cookie_jar);
    match schedule(google_config, cookie_jar, credentials, &meeting_request).await {
        Ok((meeting, credentials)) => (
            Status::Ok,
            json!({"meeting": meeting, "credentials": credentials}),
        ),
        Err(response) => response,
    }
}

/// Generate a Meet link for a list of attendees.
/// The body is read raw, so that malformed JSON is refused before anything else happens.
#[post("/calendar/meet-link", data = "<body>")]
pub async fn create_meet_link(
    google_config: &State<GoogleConfig>,
    appointment_config: &State<AppointmentConfig>,
    cookie_jar: &CookieJar<'_>,
    body: &str,
) -> (Status, Value) {
    let body: Value = match serde_json::from_str(body) {
        Ok(body) => body,
        Err(error) => {
            debug!("Meet link request is not JSON [error: {error}]");
            return error_response(Status::BadRequest, "Malformed JSON", error.to_string());
        }
    };
    let emails = match extract_emails(&body) {
        Some(emails) => emails,
        None => {
            return error_response(
                Status::BadRequest,
                "`emails` must be a non-empty array of email addresses",
                body.get("emails"),
            );
        }
    };
    let meeting_request = match build_meet_link_request(&body, emails, appointment_config) {
        Ok(meeting_request) => meeting_request,
        Err(reason) => return error_response(Status::BadRequest, "Invalid `start`", reason),
    };
    let credentials_from_body = match extract_credentials(&body) {
        Ok(credentials) => credentials,
        Err(error) => {
            return error_response(Status::BadRequest, "Invalid `credentials`", error.to_string());
        }
    };
    let credentials = resolve_credentials(credentials_from_body, cookie_jar);

    match schedule(google_config, cookie_jar, credentials, &meeting_request).await {
        Ok((meeting, credentials)) => (
            Status::Ok,
            json!({
                "meetLink": meeting.meet_link(),
                "meeting": meeting,
                "credentials": credentials,
            }),
        ),
        Err(response) => response,
    }
}

fn extract_emails(body: &Value) -> Option<Vec<String>> {
    let emails = body
        .get("emails")?
        .as_array()?
        .iter()
        .map(|email| {
            email
                .as_str()
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .map(str::to_owned)
        })
        .collect::<Option<Vec<String>>>()?;
    if emails.is_empty() { None } else { Some(emails) }
}

/// Absent or `null` credentials fall back to the cookie; anything else must be a valid credential bag.
fn extract_credentials(body: &Value) -> Result<Option<GoogleCredentials>, serde_json::Error> {
    match body.get("credentials") {
        None | Some(Value::Null) => Ok(None),
        Some(credentials) => serde_json::from_value(credentials.clone()).map(Some),
    }
}

fn build_meet_link_request(
    body: &Value,
    emails: Vec<String>,
    appointment_config: &AppointmentConfig,
) -> Result<MeetingRequest, String> {
    let (start, time_zone) = match body.get("start") {
        Some(start) => (
            serde_json::from_value::<NaiveDateTime>(start.clone())
                .map_err(|error| error.to_string())?,
            body.get("timeZone")
                .and_then(Value::as_str)
                .map(str::to_owned),
        ),
        None => (Utc::now().naive_utc(), Some(UTC.to_owned())),
    };
    let summary = body
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or(MEET_LINK_SUMMARY)
        .to_owned();
    let attendees = emails
        .into_iter()
        .map(|email| Attendee::new(email, None))
        .collect();

    let end = start
        .checked_add_signed(appointment_config.duration())
        .ok_or_else(|| format!("The meeting can't end after `{start}`"))?;

    Ok(MeetingRequest::new(
        summary,
        None,
        start,
        end,
        time_zone,
        attendees,
    ))
}

/// Shared by every endpoint creating a meeting: credentials are required,
/// and the cookie follows whatever refresh happened along the way.
pub async fn schedule(
    google_config: &GoogleConfig,
    cookie_jar: &CookieJar<'_>,
    credentials: Option<GoogleCredentials>,
    meeting_request: &MeetingRequest,
) -> Result<(Meeting, GoogleCredentials), (Status, Value)> {
    let Some(credentials) = credentials else {
        return Err(error_response(
            Status::Unauthorized,
            "Google credentials are required",
            "Connect a Google account through /api/google/authorize first.",
        ));
    };
    let client = build_client().map_err(log_error_and_return(error_response(
        Status::InternalServerError,
        "Internal error",
        Value::Null,
    )))?;

    let previous = credentials.clone();
    match calendar::create_meeting(&client, google_config, credentials, meeting_request, Utc::now())
        .await
    {
        Ok((meeting, credentials)) => {
            update_credentials(cookie_jar, &previous, &credentials);
            Ok((meeting, credentials))
        }
        Err(error) => Err(meeting_failure(error)),
    }
}

fn meeting_failure(error: GoogleError) -> (Status, Value) {
    error_response(
        Status::BadGateway,
        "The meeting could not be created",
        error.to_string(),
    )
}
