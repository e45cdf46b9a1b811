use crate::google::error::GoogleError;
use crate::google::error::GoogleError::{MissingClientId, MissingClientSecret, MissingRedirectUri};
use crate::tools::env_args::{retrieve_arg_value_or, retrieve_expected_arg_value};
use derive_getters::Getters;
use std::fmt::{Debug, Formatter};

const CLIENT_ID_ARG: &str = "--google-client-id";
const CLIENT_SECRET_ARG: &str = "--google-client-secret";
const REDIRECT_URI_ARG: &str = "--google-redirect-uri";
const CALENDAR_ID_ARG: &str = "--google-calendar-id";
const TIME_ZONE_ARG: &str = "--time-zone";
const SUCCESS_REDIRECT_ARG: &str = "--google-success-redirect";
const AUTH_URL_ARG: &str = "--google-auth-url";
const TOKEN_URL_ARG: &str = "--google-token-url";
const CALENDAR_URL_ARG: &str = "--google-calendar-url";

const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_CALENDAR_URL: &str = "https://www.googleapis.com/calendar/v3";
const DEFAULT_CALENDAR_ID: &str = "primary";
const DEFAULT_TIME_ZONE: &str = "America/Mexico_City";
const DEFAULT_SUCCESS_REDIRECT: &str = "/agendar";

#[derive(Getters, Clone)]
pub struct GoogleConfig {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: String,
    token_url: String,
    calendar_url: String,
    calendar_id: String,
    time_zone: String,
    success_redirect: String,
}

impl GoogleConfig {
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            auth_url: DEFAULT_AUTH_URL.to_owned(),
            token_url: DEFAULT_TOKEN_URL.to_owned(),
            calendar_url: DEFAULT_CALENDAR_URL.to_owned(),
            calendar_id: DEFAULT_CALENDAR_ID.to_owned(),
            time_zone: DEFAULT_TIME_ZONE.to_owned(),
            success_redirect: DEFAULT_SUCCESS_REDIRECT.to_owned(),
        }
    }

    /// Point every Google endpoint somewhere else, e.g. onto a mock server.
    pub fn with_endpoints(mut self, auth_url: String, token_url: String, calendar_url: String) -> Self {
        self.auth_url = auth_url;
        self.token_url = token_url;
        self.calendar_url = calendar_url;
        self
    }

    pub fn with_calendar(mut self, calendar_id: String, time_zone: String) -> Self {
        self.calendar_id = calendar_id;
        self.time_zone = time_zone;
        self
    }

    pub fn with_success_redirect(mut self, success_redirect: String) -> Self {
        self.success_redirect = success_redirect;
        self
    }

    pub fn from_args() -> Result<Self, GoogleError> {
        let config = Self::new(
            retrieve_expected_arg_value(CLIENT_ID_ARG, MissingClientId)?,
            retrieve_expected_arg_value(CLIENT_SECRET_ARG, MissingClientSecret)?,
            retrieve_expected_arg_value(REDIRECT_URI_ARG, MissingRedirectUri)?,
        )
        .with_endpoints(
            retrieve_arg_value_or(AUTH_URL_ARG, DEFAULT_AUTH_URL),
            retrieve_arg_value_or(TOKEN_URL_ARG, DEFAULT_TOKEN_URL),
            retrieve_arg_value_or(CALENDAR_URL_ARG, DEFAULT_CALENDAR_URL),
        )
        .with_calendar(
            retrieve_arg_value_or(CALENDAR_ID_ARG, DEFAULT_CALENDAR_ID),
            retrieve_arg_value_or(TIME_ZONE_ARG, DEFAULT_TIME_ZONE),
        )
        .with_success_redirect(retrieve_arg_value_or(
            SUCCESS_REDIRECT_ARG,
            DEFAULT_SUCCESS_REDIRECT,
        ));

        Ok(config)
    }
}

impl Debug for GoogleConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GoogleConfig {{client_id={}, client_secret=MASKED, redirect_uri={}, calendar_id={}, time_zone={}}}",
            self.client_id, self.redirect_uri, self.calendar_id, self.time_zone
        )
    }
}
