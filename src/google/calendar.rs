use crate::google::config::GoogleConfig;
use crate::google::error::GoogleError;
use crate::google::error::GoogleError::{
    CalendarRequestRejected, ConnectionFailed, InvalidEndpoint, MalformedResponse,
    MissingMeetLink,
};
use crate::google::oauth::ensure_fresh;
use chrono::{DateTime, NaiveDateTime, Utc};
use dto::google_credentials::GoogleCredentials;
use dto::meeting::{Meeting, MeetingRequest};
use log::{debug, error, info};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const MEET_SOLUTION: &str = "hangoutsMeet";
const VIDEO_ENTRY_POINT: &str = "video";

// region Google Calendar payloads
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventInsert<'a> {
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    start: EventDateTime<'a>,
    end: EventDateTime<'a>,
    attendees: Vec<EventAttendee<'a>>,
    conference_data: ConferenceDataRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventDateTime<'a> {
    date_time: String,
    time_zone: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventAttendee<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConferenceDataRequest {
    create_request: CreateConferenceRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateConferenceRequest {
    request_id: String,
    conference_solution_key: ConferenceSolutionKey,
}

#[derive(Debug, Serialize)]
struct ConferenceSolutionKey {
    #[serde(rename = "type")]
    solution_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedEvent {
    id: String,
    #[serde(default)]
    html_link: Option<String>,
    #[serde(default)]
    conference_data: Option<ConferenceData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConferenceData {
    #[serde(default)]
    entry_points: Vec<EntryPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryPoint {
    entry_point_type: String,
    uri: String,
}
// endregion

/// Insert an event with a generated Meet link into the configured calendar.
/// Credentials are refreshed beforehand if they have expired;
/// the credentials actually used are returned alongside the meeting, so that the caller can keep them.
pub async fn create_meeting(
    client: &Client,
    config: &GoogleConfig,
    credentials: GoogleCredentials,
    meeting_request: &MeetingRequest,
    now: DateTime<Utc>,
) -> Result<(Meeting, GoogleCredentials), GoogleError> {
    let (credentials, _) = ensure_fresh(client, config, credentials, now).await?;
    let url = build_events_url(config)?;
    let event = build_event(config, meeting_request);

    let response = client
        .post(url)
        .bearer_auth(credentials.access_token())
        .json(&event)
        .send()
        .await
        .map_err(|error| {
            error!("Can't reach Google Calendar\n{error:#?}");
            ConnectionFailed(error.to_string())
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|error| ConnectionFailed(error.to_string()))?;
    if !status.is_success() {
        error!("Google Calendar refused event creation [status: {status}, body: {body}]");
        return Err(CalendarRequestRejected {
            status: status.as_u16(),
            details: body,
        });
    }

    let created_event: CreatedEvent = serde_json::from_str(&body).map_err(|error| {
        error!("Can't read created event\n{error:#?}");
        MalformedResponse(error.to_string())
    })?;
    let meeting = into_meeting(created_event)?;
    info!("Meeting created [event_id: {}]", meeting.event_id());

    Ok((meeting, credentials))
}

fn build_events_url(config: &GoogleConfig) -> Result<Url, GoogleError> {
    let invalid_endpoint = || InvalidEndpoint(config.calendar_url().to_owned());
    let mut url = Url::parse(config.calendar_url()).map_err(|_| invalid_endpoint())?;
    url.path_segments_mut()
        .map_err(|_| invalid_endpoint())?
        .pop_if_empty()
        .extend(["calendars", config.calendar_id().as_str(), "events"]);
    url.query_pairs_mut()
        .append_pair("conferenceDataVersion", "1")
        .append_pair("sendUpdates", "all");
    Ok(url)
}

fn build_event<'a>(config: &'a GoogleConfig, meeting_request: &'a MeetingRequest) -> EventInsert<'a> {
    let time_zone = meeting_request
        .time_zone()
        .as_deref()
        .unwrap_or(config.time_zone());
    let attendees = meeting_request
        .attendees()
        .iter()
        .map(|attendee| EventAttendee {
            email: attendee.email(),
            display_name: attendee.name().as_deref(),
        })
        .collect();

    EventInsert {
        summary: meeting_request.summary(),
        description: meeting_request.description().as_deref(),
        start: to_event_date_time(meeting_request.start(), time_zone),
        end: to_event_date_time(meeting_request.end(), time_zone),
        attendees,
        conference_data: ConferenceDataRequest {
            create_request: CreateConferenceRequest {
                request_id: Uuid::new_v4().to_string(),
                conference_solution_key: ConferenceSolutionKey {
                    solution_type: MEET_SOLUTION,
                },
            },
        },
    }
}

fn to_event_date_time<'a>(date_time: &NaiveDateTime, time_zone: &'a str) -> EventDateTime<'a> {
    EventDateTime {
        date_time: date_time.format(DATE_TIME_FORMAT).to_string(),
        time_zone,
    }
}

fn into_meeting(created_event: CreatedEvent) -> Result<Meeting, GoogleError> {
    let meet_link = created_event
        .conference_data
        .as_ref()
        .into_iter()
        .flat_map(|conference_data| conference_data.entry_points.iter())
        .find(|entry_point| entry_point.entry_point_type == VIDEO_ENTRY_POINT)
        .map(|entry_point| entry_point.uri.clone());

    match meet_link {
        Some(meet_link) => Ok(Meeting::new(
            created_event.id,
            meet_link,
            created_event.html_link.unwrap_or_default(),
        )),
        None => {
            debug!("Created event has no video entry point [event: {created_event:?}]");
            Err(MissingMeetLink(created_event.id))
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::google::config::tests::create_google_test_config;
    use crate::google::credentials::tests::get_now;
    use crate::google::oauth::tests::{
        get_expired_credentials, get_valid_credentials, setup_token_refresh,
    };
    use crate::tools::web::build_client;
    use chrono::NaiveDate;
    use dto::meeting::Attendee;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const EVENT_ID: &str = "7cbh8rpc10lrc0ckih9tafss99";
    pub const MEET_LINK: &str = "https://meet.google.com/abc-defg-hij";
    pub const HTML_LINK: &str =
        "https://www.google.com/calendar/event?eid=N2NiaDhycGMxMGxyYzBja2loOXRhZnNzOTk";

    pub fn get_created_event_body() -> serde_json::Value {
        json!({
            "kind": "calendar#event",
            "id": EVENT_ID,
            "status": "confirmed",
            "htmlLink": HTML_LINK,
            "hangoutLink": MEET_LINK,
            "conferenceData": {
                "entryPoints": [
                    {"entryPointType": "video", "uri": MEET_LINK, "label": "meet.google.com/abc-defg-hij"},
                    {"entryPointType": "more", "uri": "https://tel.meet/abc-defg-hij?pin=123"}
                ],
                "conferenceSolution": {"key": {"type": "hangoutsMeet"}}
            }
        })
    }

    /// Mock a successful event insertion, expected to be called with the given access token.
    pub async fn setup_event_insertion(mock_server: &MockServer, access_token: &str) {
        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .and(query_param("conferenceDataVersion", "1"))
            .and(header("Authorization", format!("Bearer {access_token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(get_created_event_body()))
            .expect(1)
            .mount(mock_server)
            .await;
    }

    pub fn get_meeting_request() -> MeetingRequest {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        MeetingRequest::new(
            "Entrevista promotora - Jon Doe".to_owned(),
            Some("Tienda Centro".to_owned()),
            date.and_hms_opt(10, 30, 0).unwrap(),
            date.and_hms_opt(11, 0, 0).unwrap(),
            None,
            vec![Attendee::new(
                "jon.doe@email.com".to_owned(),
                Some("Jon Doe".to_owned()),
            )],
        )
    }

    fn get_expected_meeting() -> Meeting {
        Meeting::new(
            EVENT_ID.to_owned(),
            MEET_LINK.to_owned(),
            HTML_LINK.to_owned(),
        )
    }

    // region create_meeting
    #[async_test]
    async fn should_create_meeting() {
        let mock_server = MockServer::start().await;
        let config = create_google_test_config(&mock_server.uri());
        let now = get_now();
        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .and(query_param("conferenceDataVersion", "1"))
            .and(query_param("sendUpdates", "all"))
            .and(header("Authorization", "Bearer ya29.valid"))
            .and(body_partial_json(json!({
                "summary": "Entrevista promotora - Jon Doe",
                "start": {"dateTime": "2025-03-14T10:30:00", "timeZone": "America/Mexico_City"},
                "end": {"dateTime": "2025-03-14T11:00:00", "timeZone": "America/Mexico_City"},
                "attendees": [{"email": "jon.doe@email.com", "displayName": "Jon Doe"}],
                "conferenceData": {"createRequest": {"conferenceSolutionKey": {"type": "hangoutsMeet"}}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(get_created_event_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let credentials = get_valid_credentials(now);
        let (meeting, used_credentials) = create_meeting(
            &build_client().unwrap(),
            &config,
            credentials.clone(),
            &get_meeting_request(),
            now,
        )
        .await
        .unwrap();

        assert_eq!(get_expected_meeting(), meeting);
        assert_eq!(credentials, used_credentials);
    }

    #[async_test]
    async fn should_refresh_expired_credentials_before_creating_meeting() {
        let mock_server = MockServer::start().await;
        let config = create_google_test_config(&mock_server.uri());
        let now = get_now();
        setup_token_refresh(&mock_server, "ya29.refreshed").await;
        setup_event_insertion(&mock_server, "ya29.refreshed").await;

        let (meeting, used_credentials) = create_meeting(
            &build_client().unwrap(),
            &config,
            get_expired_credentials(now),
            &get_meeting_request(),
            now,
        )
        .await
        .unwrap();

        assert_eq!(get_expected_meeting(), meeting);
        assert_eq!("ya29.refreshed", used_credentials.access_token());
        let received_requests = mock_server.received_requests().await.unwrap();
        assert_eq!(2, received_requests.len());
        assert_eq!("/token", received_requests[0].url.path());
        assert_eq!(
            "/calendar/v3/calendars/primary/events",
            received_requests[1].url.path()
        );
    }

    #[async_test]
    async fn should_use_requested_time_zone() {
        let mock_server = MockServer::start().await;
        let config = create_google_test_config(&mock_server.uri());
        let now = get_now();
        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .and(body_partial_json(json!({
                "start": {"timeZone": "America/Bogota"},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(get_created_event_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let request = get_meeting_request();
        let request = MeetingRequest::new(
            request.summary().clone(),
            None,
            *request.start(),
            *request.end(),
            Some("America/Bogota".to_owned()),
            vec![],
        );
        create_meeting(
            &build_client().unwrap(),
            &config,
            get_valid_credentials(now),
            &request,
            now,
        )
        .await
        .unwrap();
    }

    #[async_test]
    async fn should_fail_to_create_meeting_when_calendar_refuses() {
        let mock_server = MockServer::start().await;
        let config = create_google_test_config(&mock_server.uri());
        let now = get_now();
        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .respond_with(ResponseTemplate::new(401).set_body_string(
                r#"{"error": {"code": 401, "message": "Request had invalid authentication credentials."}}"#,
            ))
            .mount(&mock_server)
            .await;

        let error = create_meeting(
            &build_client().unwrap(),
            &config,
            get_valid_credentials(now),
            &get_meeting_request(),
            now,
        )
        .await
        .unwrap_err();

        match error {
            CalendarRequestRejected { status, details } => {
                assert_eq!(401, status);
                assert!(details.contains("invalid authentication credentials"));
            }
            error => panic!("Unexpected error: {error:?}"),
        }
    }

    #[async_test]
    async fn should_fail_to_create_meeting_when_no_video_entry_point() {
        let mock_server = MockServer::start().await;
        let config = create_google_test_config(&mock_server.uri());
        let now = get_now();
        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": EVENT_ID,
                "htmlLink": HTML_LINK,
                "conferenceData": {"createRequest": {"status": {"statusCode": "pending"}}}
            })))
            .mount(&mock_server)
            .await;

        let error = create_meeting(
            &build_client().unwrap(),
            &config,
            get_valid_credentials(now),
            &get_meeting_request(),
            now,
        )
        .await
        .unwrap_err();

        assert_eq!(MissingMeetLink(EVENT_ID.to_owned()), error);
    }

    #[async_test]
    async fn should_not_call_calendar_when_refresh_fails() {
        let mock_server = MockServer::start().await;
        let config = create_google_test_config(&mock_server.uri());
        let now = get_now();
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(get_created_event_body()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let error = create_meeting(
            &build_client().unwrap(),
            &config,
            get_expired_credentials(now),
            &get_meeting_request(),
            now,
        )
        .await
        .unwrap_err();

        assert!(matches!(error, GoogleError::TokenRequestRejected { .. }));
    }
    // endregion

    // region build_events_url
    #[test]
    fn should_encode_calendar_id_in_url() {
        let config = GoogleConfig::new(
            "client-id".to_owned(),
            "client-secret".to_owned(),
            "http://localhost".to_owned(),
        )
        .with_calendar(
            "entrevistas@group.calendar.google.com".to_owned(),
            "UTC".to_owned(),
        );

        let url = build_events_url(&config).unwrap();

        assert_eq!(
            "https://www.googleapis.com/calendar/v3/calendars/entrevistas@group.calendar.google.com/events?conferenceDataVersion=1&sendUpdates=all",
            url.as_str()
        );
    }
    // endregion
}
