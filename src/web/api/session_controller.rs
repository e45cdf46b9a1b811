use crate::backend::config::BackendConfig;
use crate::backend::error::BackendError;
use crate::backend::login::login as login_into_backend;
use crate::session::token::SessionToken;
use crate::session::{SESSION_COOKIE, Session};
use crate::tools::log_error_and_return;
use crate::tools::web::build_client;
use crate::web::error::error_response;
use chrono::Utc;
use dto::login_credentials::LoginCredentials;
use rocket::State;
use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::serde::json::{Json, Value, json};
use rocket::time::Duration;

/// Log an admin in through the backend.
/// On success, the session token is handed back in the `Promotoras-Session` private cookie.
#[post("/session", format = "application/json", data = "<credentials>")]
pub async fn login(
    backend_config: &State<BackendConfig>,
    cookie_jar: &CookieJar<'_>,
    credentials: Json<LoginCredentials>,
) -> (Status, Value) {
    let client = match build_client() {
        Ok(client) => client,
        Err(error) => {
            return log_error_and_return(error_response(
                Status::InternalServerError,
                "Internal error",
                Value::Null,
            ))(error);
        }
    };

    match login_into_backend(&client, backend_config, &credentials).await {
        Ok(()) => {
            let token = SessionToken::new(credentials.username().to_owned(), Utc::now());
            let cookie = Cookie::build((SESSION_COOKIE, token.encode()))
                .max_age(Duration::hours(24))
                .same_site(SameSite::Strict)
                .build();
            cookie_jar.add_private(cookie);
            (Status::Ok, session_body(&token))
        }
        Err(BackendError::WrongCredentials) => error_response(
            Status::Unauthorized,
            "Wrong username or password",
            Value::Null,
        ),
        Err(error) => error_response(
            Status::BadGateway,
            "The backend can't check credentials",
            error.to_string(),
        ),
    }
}

#[get("/session")]
pub fn current_session(session: Session) -> Value {
    session_body(session.token())
}

#[delete("/session")]
pub fn logout(cookie_jar: &CookieJar<'_>) -> Status {
    cookie_jar.remove_private(SESSION_COOKIE);
    Status::NoContent
}

fn session_body(token: &SessionToken) -> Value {
    json!({"username": token.username(), "expiresAt": token.expires_at()})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::config::tests::create_backend_test_config;
    use crate::backend::login::tests::{PASSWORD, setup_login};
    use crate::web::api::catchers;
    use chrono::TimeDelta;
    use rocket::http::ContentType;
    use rocket::local::asynchronous::Client;

    async fn get_client(uri: &str) -> Client {
        let rocket = rocket::build()
            .manage(create_backend_test_config(uri))
            .mount("/api", routes![login, current_session, logout])
            .register("/api", catchers::all());
        Client::tracked(rocket).await.unwrap()
    }

    fn get_credentials_body(username: &str) -> String {
        json!({"username": username, "password": PASSWORD}).to_string()
    }

    #[async_test]
    async fn should_login() {
        let mock_server = wiremock::MockServer::start().await;
        setup_login(&mock_server, "admin", 200).await;
        let client = get_client(&mock_server.uri()).await;

        let response = client
            .post("/api/session")
            .header(ContentType::JSON)
            .body(get_credentials_body("admin"))
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let cookie = response.cookies().get_private(SESSION_COOKIE).unwrap();
        let token = SessionToken::decode(cookie.value()).unwrap();
        assert_eq!("admin", token.username());
        assert!(token.is_valid(Utc::now()));
    }

    #[async_test]
    async fn should_refuse_wrong_credentials() {
        let mock_server = wiremock::MockServer::start().await;
        setup_login(&mock_server, "intruder", 401).await;
        let client = get_client(&mock_server.uri()).await;

        let response = client
            .post("/api/session")
            .header(ContentType::JSON)
            .body(get_credentials_body("intruder"))
            .dispatch()
            .await;

        assert_eq!(Status::Unauthorized, response.status());
        assert!(response.cookies().get_private(SESSION_COOKIE).is_none());
    }

    #[async_test]
    async fn should_report_unreachable_backend() {
        let client = get_client("http://127.0.0.1:1").await;

        let response = client
            .post("/api/session")
            .header(ContentType::JSON)
            .body(get_credentials_body("admin"))
            .dispatch()
            .await;

        assert_eq!(Status::BadGateway, response.status());
    }

    #[async_test]
    async fn should_return_current_session() {
        let client = get_client("http://127.0.0.1:1").await;
        let token = SessionToken::new("admin".to_owned(), Utc::now() - TimeDelta::hours(2));

        let response = client
            .get("/api/session")
            .private_cookie(Cookie::new(SESSION_COOKIE, token.encode()))
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let body: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!("admin", body["username"]);
        assert_eq!(token.expires_at(), body["expiresAt"]);
    }

    #[async_test]
    async fn should_reject_stale_session_with_json_error() {
        let client = get_client("http://127.0.0.1:1").await;
        let token = SessionToken::new("admin".to_owned(), Utc::now() - TimeDelta::hours(30));

        let response = client
            .get("/api/session")
            .private_cookie(Cookie::new(SESSION_COOKIE, token.encode()))
            .dispatch()
            .await;

        assert_eq!(Status::Unauthorized, response.status());
        let body: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!("A valid session is required", body["error"]);
    }

    #[async_test]
    async fn should_logout() {
        let client = get_client("http://127.0.0.1:1").await;

        let response = client
            .delete("/api/session")
            .private_cookie(Cookie::new(SESSION_COOKIE, "whatever"))
            .dispatch()
            .await;

        assert_eq!(Status::NoContent, response.status());
        let removal_prefix = format!("{SESSION_COOKIE}=;");
        assert!(
            response
                .headers()
                .get("Set-Cookie")
                .any(|header| header.starts_with(&removal_prefix))
        );
    }
}
