use crate::google::config::GoogleConfig;
use crate::google::credentials::{TokenResponse, is_expired, refreshed};
use crate::google::error::GoogleError;
use crate::google::error::GoogleError::{
    ConnectionFailed, InvalidEndpoint, MalformedResponse, MissingRefreshToken,
    TokenRequestRejected,
};
use chrono::{DateTime, Utc};
use dto::google_credentials::GoogleCredentials;
use log::{debug, error, info};
use reqwest::{Client, Url};

pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

/// Build the consent page URL the user should be sent to.
/// Offline access is requested so that a refresh token is handed out.
pub fn authorization_url(config: &GoogleConfig, state: &str) -> Result<Url, GoogleError> {
    Url::parse_with_params(
        config.auth_url(),
        &[
            ("client_id", config.client_id().as_str()),
            ("redirect_uri", config.redirect_uri().as_str()),
            ("response_type", "code"),
            ("scope", CALENDAR_SCOPE),
            ("access_type", "offline"),
            ("prompt", "consent"),
            ("include_granted_scopes", "true"),
            ("state", state),
        ],
    )
    .map_err(|error| InvalidEndpoint(format!("{}: {error}", config.auth_url())))
}

pub async fn exchange_code(
    client: &Client,
    config: &GoogleConfig,
    code: &str,
    now: DateTime<Utc>,
) -> Result<GoogleCredentials, GoogleError> {
    let params = [
        ("code", code),
        ("client_id", config.client_id().as_str()),
        ("client_secret", config.client_secret().as_str()),
        ("redirect_uri", config.redirect_uri().as_str()),
        ("grant_type", "authorization_code"),
    ];
    let token_response = request_token(client, config, &params).await?;
    if token_response.refresh_token.is_none() {
        info!("Google didn't hand out any refresh token, credentials will stop working on expiry.");
    }

    Ok(token_response.into_credentials(now))
}

pub async fn refresh_access_token(
    client: &Client,
    config: &GoogleConfig,
    credentials: &GoogleCredentials,
    now: DateTime<Utc>,
) -> Result<GoogleCredentials, GoogleError> {
    let refresh_token = credentials.refresh_token().as_ref().ok_or_else(|| {
        error!("Can't refresh Google access token without refresh token");
        MissingRefreshToken
    })?;
    let params = [
        ("refresh_token", refresh_token.as_str()),
        ("client_id", config.client_id().as_str()),
        ("client_secret", config.client_secret().as_str()),
        ("grant_type", "refresh_token"),
    ];
    let token_response = request_token(client, config, &params).await?;

    Ok(refreshed(credentials, token_response, now))
}

/// Return credentials usable right now.
/// If the access token has expired, it is refreshed once; otherwise credentials are returned untouched.
/// The boolean tells whether a refresh occurred.
pub async fn ensure_fresh(
    client: &Client,
    config: &GoogleConfig,
    credentials: GoogleCredentials,
    now: DateTime<Utc>,
) -> Result<(GoogleCredentials, bool), GoogleError> {
    if is_expired(&credentials, now) {
        debug!("Google access token has expired, refreshing it.");
        let credentials = refresh_access_token(client, config, &credentials, now).await?;
        Ok((credentials, true))
    } else {
        Ok((credentials, false))
    }
}

async fn request_token(
    client: &Client,
    config: &GoogleConfig,
    params: &[(&str, &str)],
) -> Result<TokenResponse, GoogleError> {
    let response = client
        .post(config.token_url())
        .form(params)
        .send()
        .await
        .map_err(|error| {
            error!("Can't reach Google token endpoint\n{error:#?}");
            ConnectionFailed(error.to_string())
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|error| ConnectionFailed(error.to_string()))?;
    if !status.is_success() {
        error!("Google token endpoint refused the request [status: {status}, body: {body}]");
        return Err(TokenRequestRejected {
            status: status.as_u16(),
            details: body,
        });
    }

    serde_json::from_str(&body).map_err(|error| {
        error!("Can't read Google token response\n{error:#?}");
        MalformedResponse(error.to_string())
    })
}
