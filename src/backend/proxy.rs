use crate::backend::config::BackendConfig;
use crate::backend::error::BackendError;
use crate::backend::error::BackendError::ConnectionFailed;
use derive_getters::Getters;
use log::{debug, error};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};

const JSON_CONTENT_TYPE: &str = "application/json";

/// What the backend answered, relayed untouched to the caller.
#[derive(Debug, Getters, Clone, PartialEq)]
pub struct BackendResponse {
    status: u16,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl BackendResponse {
    pub fn new(status: u16, content_type: Option<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }
}

/// Relay a request onto the backend: method, path, query string and JSON body are kept as is.
pub async fn forward(
    client: &Client,
    config: &BackendConfig,
    method: Method,
    path: &str,
    query: Option<&str>,
    body: Option<String>,
) -> Result<BackendResponse, BackendError> {
    let mut url = config.url_for(path)?;
    url.set_query(query.filter(|query| !query.is_empty()));
    debug!("Forwarding request to backend [method: {method}, url: {url}]");

    let mut request = client.request(method, url);
    if let Some(body) = body.filter(|body| !body.is_empty()) {
        request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
    }
    let response = request.send().await.map_err(|error| {
        error!("Can't reach backend\n{error:#?}");
        ConnectionFailed(error.to_string())
    })?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = response
        .bytes()
        .await
        .map_err(|error| ConnectionFailed(error.to_string()))?;

    Ok(BackendResponse::new(status, content_type, body.to_vec()))
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::backend::config::tests::create_backend_test_config;
    use crate::tools::web::build_client;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub fn get_slots_body() -> serde_json::Value {
        json!([
            {"date": "2025-03-14", "time": "10:30", "available": true},
            {"date": "2025-03-14", "time": "11:00", "available": false}
        ])
    }

    pub async fn setup_slots(mock_server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/slots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(get_slots_body()))
            .expect(1)
            .mount(mock_server)
            .await;
    }

    #[async_test]
    async fn should_forward_get_with_query() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/slots"))
            .and(query_param("date", "2025-03-14"))
            .respond_with(ResponseTemplate::new(200).set_body_json(get_slots_body()))
            .expect(1)
            .mount(&mock_server)
            .await;
        let config = create_backend_test_config(&mock_server.uri());
        let client = build_client().unwrap();

        let response = forward(&client, &config, Method::GET, "slots", Some("date=2025-03-14"), None)
            .await
            .unwrap();

        assert_eq!(&200, response.status());
        assert_eq!(&Some("application/json".to_owned()), response.content_type());
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(get_slots_body(), body);
    }

    #[async_test]
    async fn should_forward_json_body() {
        let mock_server = MockServer::start().await;
        let approval = json!({"approved": true});
        Mock::given(method("PUT"))
            .and(path("/api/approval/42"))
            .and(header("Content-Type", JSON_CONTENT_TYPE))
            .and(body_json(&approval))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;
        let config = create_backend_test_config(&mock_server.uri());
        let client = build_client().unwrap();

        let response = forward(
            &client,
            &config,
            Method::PUT,
            "approval/42",
            None,
            Some(approval.to_string()),
        )
        .await
        .unwrap();

        assert_eq!(&204, response.status());
        assert!(response.body().is_empty());
    }

    #[async_test]
    async fn should_relay_backend_errors_untouched() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/users/42"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"error": "User has appointments"})),
            )
            .mount(&mock_server)
            .await;
        let config = create_backend_test_config(&mock_server.uri());
        let client = build_client().unwrap();

        let response = forward(&client, &config, Method::DELETE, "users/42", None, None)
            .await
            .unwrap();

        assert_eq!(&409, response.status());
        assert!(String::from_utf8_lossy(response.body()).contains("User has appointments"));
    }

    #[async_test]
    async fn should_fail_when_backend_is_unreachable() {
        let config = BackendConfig::new("http://127.0.0.1:1/api".to_owned());
        let client = build_client().unwrap();

        let error = forward(&client, &config, Method::GET, "slots", None, None)
            .await
            .unwrap_err();

        assert!(matches!(error, ConnectionFailed(_)));
    }
}
