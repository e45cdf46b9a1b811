use crate::google::config::GoogleConfig;
use crate::google::oauth::{authorization_url, exchange_code};
use crate::tools::log_error;
use crate::tools::web::build_client;
use crate::web::error::error_response;
use chrono::Utc;
use dto::google_credentials::GoogleCredentials;
use log::{debug, info, warn};
use rocket::State;
use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::response::Redirect;
use rocket::serde::json::{Value, json};
use rocket::time::Duration;
use uuid::Uuid;

pub const CREDENTIALS_COOKIE: &str = "Google-Credentials";
pub const OAUTH_STATE_COOKIE: &str = "Google-OAuth-State";

/// Start the consent flow: the caller is given the URL to send the user to.
/// An anti-forgery state is kept in a private cookie until the callback comes back.
#[get("/google/authorize")]
pub fn authorize(google_config: &State<GoogleConfig>, cookie_jar: &CookieJar<'_>) -> (Status, Value) {
    let state = Uuid::new_v4().to_string();
    match authorization_url(google_config, &state) {
        Ok(url) => {
            let cookie = Cookie::build((OAUTH_STATE_COOKIE, state))
                .max_age(Duration::minutes(10))
                .same_site(SameSite::Lax)
                .build();
            cookie_jar.add_private(cookie);
            (Status::Ok, json!({"url": url.as_str()}))
        }
        Err(error) => {
            log_error(&error);
            error_response(
                Status::InternalServerError,
                "Can't build the authorization URL",
                error.to_string(),
            )
        }
    }
}

/// Where Google sends the user back after consent.
/// Tokens are kept in a private cookie; only an error code ever travels in the redirection URL.
#[get("/google/callback?<code>&<state>&<error>")]
pub async fn callback(
    google_config: &State<GoogleConfig>,
    cookie_jar: &CookieJar<'_>,
    code: Option<&str>,
    state: Option<&str>,
    error: Option<&str>,
) -> Redirect {
    let expected_state = cookie_jar
        .get_private(OAUTH_STATE_COOKIE)
        .map(|cookie| cookie.value().to_owned());
    cookie_jar.remove_private(OAUTH_STATE_COOKIE);
    let redirect = google_config.success_redirect();

    if let Some(error) = error {
        warn!("Google consent failed [error: {error}]");
        return redirect_with_error(redirect, sanitize_error_code(error));
    }
    if expected_state.is_none() || expected_state.as_deref() != state {
        warn!("OAuth state mismatch, callback ignored");
        return redirect_with_error(redirect, "invalid_state");
    }
    let Some(code) = code else {
        return redirect_with_error(redirect, "missing_code");
    };

    let Ok(client) = build_client() else {
        return redirect_with_error(redirect, "internal_error");
    };
    match exchange_code(&client, google_config, code, Utc::now()).await {
        Ok(credentials) => {
            store_credentials(cookie_jar, &credentials);
            info!("Google account connected");
            Redirect::to(redirect.clone())
        }
        Err(error) => {
            log_error(&error);
            redirect_with_error(redirect, "token_exchange_failed")
        }
    }
}

fn redirect_with_error(redirect: &str, error_code: &str) -> Redirect {
    let separator = if redirect.contains('?') { '&' } else { '?' };
    Redirect::to(format!("{redirect}{separator}error={error_code}"))
}

/// Provider error codes are echoed back only when they look like one.
fn sanitize_error_code(error: &str) -> &str {
    let looks_like_code = !error.is_empty()
        && error
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if looks_like_code { error } else { "authorization_failed" }
}

/// Credentials given in a request body win over the ones kept in the cookie.
pub fn resolve_credentials(
    from_body: Option<GoogleCredentials>,
    cookie_jar: &CookieJar<'_>,
) -> Option<GoogleCredentials> {
    from_body.or_else(|| stored_credentials(cookie_jar))
}

pub fn stored_credentials(cookie_jar: &CookieJar<'_>) -> Option<GoogleCredentials> {
    let cookie = cookie_jar.get_private(CREDENTIALS_COOKIE)?;
    match serde_json::from_str(cookie.value()) {
        Ok(credentials) => Some(credentials),
        Err(error) => {
            debug!("Unreadable credentials cookie [error: {error}]");
            None
        }
    }
}

pub fn store_credentials(cookie_jar: &CookieJar<'_>, credentials: &GoogleCredentials) {
    match serde_json::to_string(credentials) {
        Ok(value) => {
            let cookie = Cookie::build((CREDENTIALS_COOKIE, value))
                .max_age(Duration::days(30))
                .same_site(SameSite::Lax)
                .build();
            cookie_jar.add_private(cookie);
        }
        Err(error) => log_error(error),
    }
}

/// Keep the cookie in sync when a meeting creation had to refresh the access token.
pub fn update_credentials(
    cookie_jar: &CookieJar<'_>,
    previous: &GoogleCredentials,
    current: &GoogleCredentials,
) {
    if previous != current {
        store_credentials(cookie_jar, current);
    }
}
