use crate::backend::config::BackendConfig;
use crate::backend::error::BackendError;
use crate::backend::error::BackendError::{ConnectionFailed, WrongCredentials};
use dto::login_credentials::LoginCredentials;
use log::{error, info, warn};
use reqwest::{Client, StatusCode};

const LOGIN_PATH: &str = "users/login";

/// Ask the backend whether these credentials belong to an admin.
pub async fn login(
    client: &Client,
    config: &BackendConfig,
    credentials: &LoginCredentials,
) -> Result<(), BackendError> {
    let url = config.url_for(LOGIN_PATH)?;
    let response = client
        .post(url)
        .json(credentials)
        .send()
        .await
        .map_err(|error| {
            error!("Can't reach backend for login\n{error:#?}");
            ConnectionFailed(error.to_string())
        })?;

    match response.status() {
        status if status.is_success() => {
            info!("User logged in [username: {}]", credentials.username());
            Ok(())
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            warn!("Login refused [username: {}]", credentials.username());
            Err(WrongCredentials)
        }
        status => {
            error!("Unexpected login answer from backend [status: {status}]");
            Err(ConnectionFailed(format!("Unexpected status {status}")))
        }
    }
}
