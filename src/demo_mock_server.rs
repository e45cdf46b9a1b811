use crate::backend::config::BackendConfig;
use crate::email::error::EmailError;
use crate::email::mailer::Mailer;
use crate::google::config::GoogleConfig;
use crate::tools::env_args::retrieve_arg_value_or;
use dto::email::Email;
use log::info;
use serde_json::json;
use std::sync::OnceLock;
use wiremock::matchers::{body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

static GOOGLE_MOCK_SERVER: OnceLock<MockServer> = OnceLock::new();
static BACKEND_MOCK_SERVER: OnceLock<MockServer> = OnceLock::new();

const DEMO_REDIRECT_URI: &str = "http://localhost:8000/api/google/callback";
const DEMO_MEET_LINK: &str = "https://meet.google.com/dem-oooo-mee";

/// Start mock servers standing in for Google and the backend.
/// They live as long as the application does.
pub async fn init_demo() {
    let google_server = init_google_mock_server().await;
    let backend_server = init_backend_mock_server().await;
    info!(
        "Demo mode [google: {}, backend: {}]",
        google_server.uri(),
        backend_server.uri()
    );
    let _ = GOOGLE_MOCK_SERVER.set(google_server);
    let _ = BACKEND_MOCK_SERVER.set(backend_server);
}

fn mock_server_uri(server: &OnceLock<MockServer>) -> String {
    server.get().map(MockServer::uri).unwrap_or_default()
}

pub fn demo_google_config() -> GoogleConfig {
    let uri = mock_server_uri(&GOOGLE_MOCK_SERVER);
    GoogleConfig::new(
        "demo-client-id".to_owned(),
        "demo-client-secret".to_owned(),
        retrieve_arg_value_or("--google-redirect-uri", DEMO_REDIRECT_URI),
    )
    .with_endpoints(
        format!("{uri}/o/oauth2/v2/auth"),
        format!("{uri}/token"),
        format!("{uri}/calendar/v3"),
    )
}

pub fn demo_backend_config() -> BackendConfig {
    BackendConfig::new(format!("{}/api", mock_server_uri(&BACKEND_MOCK_SERVER)))
}

/// Emails are logged instead of being sent.
pub struct LoggingMailer;

#[rocket::async_trait]
impl Mailer for LoggingMailer {
    async fn send(&self, email: &Email) -> Result<(), EmailError> {
        info!(
            "Demo email [recipient: {}, subject: {}]\n{}",
            email.recipient(),
            email.subject(),
            email.html_body()
        );
        Ok(())
    }
}

// region Google
async fn init_google_mock_server() -> MockServer {
    let mock_server = MockServer::start().await;
    mock_consent(&mock_server).await;
    mock_token_endpoint(&mock_server).await;
    mock_event_insertion(&mock_server).await;

    mock_server
}

/// Consent is always given: the user is sent straight back with a code and the state they came with.
struct ConsentRedirect;

impl Respond for ConsentRedirect {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let query_value = |name: &str| {
            request
                .url
                .query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
                .unwrap_or_default()
        };
        let redirect_uri = query_value("redirect_uri");
        let state = query_value("state");
        ResponseTemplate::new(302).insert_header(
            "Location",
            format!("{redirect_uri}?code=demo-code&state={state}").as_str(),
        )
    }
}

async fn mock_consent(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/o/oauth2/v2/auth"))
        .respond_with(ConsentRedirect)
        .mount(mock_server)
        .await;
}

async fn mock_token_endpoint(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.demo",
            "expires_in": 3599,
            "refresh_token": "1//demo",
            "scope": crate::google::oauth::CALENDAR_SCOPE,
            "token_type": "Bearer"
        })))
        .mount(mock_server)
        .await;
}

async fn mock_event_insertion(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/calendar/v3/calendars/[^/]+/events$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "demo-event",
            "htmlLink": "https://www.google.com/calendar/event?eid=ZGVtbw",
            "conferenceData": {
                "entryPoints": [{"entryPointType": "video", "uri": DEMO_MEET_LINK}]
            }
        })))
        .mount(mock_server)
        .await;
}
// endregion

// region Backend
async fn init_backend_mock_server() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"date": "2025-03-14", "time": "10:30", "available": true},
            {"date": "2025-03-14", "time": "11:00", "available": true}
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .mount(&mock_server)
        .await;
    Mock::given(path_regex(r"^/api/users/[^/]+/progress$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"completed": []})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/(users|slots|schedule|attendance|approval|appointments)(/.*)?$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(path_regex(r"^/api/(users|slots|schedule|attendance|approval|appointments)(/.*)?$"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    mock_server
}
// endregion
