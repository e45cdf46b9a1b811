use chrono::{DateTime, Utc};
use dto::google_credentials::GoogleCredentials;
use serde::Deserialize;

/// Body returned by Google's token endpoint, for both code exchanges and refreshes.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    pub fn into_credentials(self, now: DateTime<Utc>) -> GoogleCredentials {
        let expiry_date = self.expires_in.map(|expires_in| {
            now.timestamp_millis()
                .saturating_add(expires_in.saturating_mul(1000))
        });
        GoogleCredentials::new(self.access_token, self.refresh_token, expiry_date)
            .with_token_type(self.token_type)
            .with_scope(self.scope)
    }
}

/// A token is expired once its expiry date has been reached.
/// Credentials without expiry date are trusted as is.
pub fn is_expired(credentials: &GoogleCredentials, now: DateTime<Utc>) -> bool {
    credentials
        .expiry_date()
        .is_some_and(|expiry_date| expiry_date <= now.timestamp_millis())
}

/// Merge a refresh response into existing credentials.
/// Google usually doesn't send the refresh token back, so the previous one is kept.
pub fn refreshed(
    credentials: &GoogleCredentials,
    token_response: TokenResponse,
    now: DateTime<Utc>,
) -> GoogleCredentials {
    let previous_refresh_token = credentials.refresh_token().clone();
    let previous_scope = credentials.scope().clone();
    let token_response = TokenResponse {
        refresh_token: token_response.refresh_token.or(previous_refresh_token),
        scope: token_response.scope.or(previous_scope),
        ..token_response
    };
    token_response.into_credentials(now)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use chrono::TimeZone;
    use parameterized::{ide, parameterized};

    ide!();

    pub fn get_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[parameterized(
        expiry_offset_in_ms = {Some(-60_000), Some(0), Some(1), Some(3_600_000), None},
        expected_result = {true, true, false, false, false}
    )]
    fn should_tell_whether_expired(expiry_offset_in_ms: Option<i64>, expected_result: bool) {
        let now = get_now();
        let expiry_date = expiry_offset_in_ms.map(|offset| now.timestamp_millis() + offset);
        let credentials = GoogleCredentials::new("access".to_owned(), None, expiry_date);

        assert_eq!(expected_result, is_expired(&credentials, now));
    }

    #[test]
    fn should_convert_token_response_into_credentials() {
        let now = get_now();
        let token_response = TokenResponse {
            access_token: "ya29.new".to_owned(),
            expires_in: Some(3599),
            refresh_token: Some("1//refresh".to_owned()),
            scope: None,
            token_type: Some("Bearer".to_owned()),
        };

        let credentials = token_response.into_credentials(now);

        assert_eq!("ya29.new", credentials.access_token());
        assert_eq!(&Some("1//refresh".to_owned()), credentials.refresh_token());
        assert_eq!(
            &Some(now.timestamp_millis() + 3_599_000),
            credentials.expiry_date()
        );
    }

    #[test]
    fn should_saturate_huge_expiry() {
        let token_response = TokenResponse {
            access_token: "ya29.new".to_owned(),
            expires_in: Some(i64::MAX / 10),
            refresh_token: None,
            scope: None,
            token_type: None,
        };

        let credentials = token_response.into_credentials(get_now());

        assert_eq!(&Some(i64::MAX), credentials.expiry_date());
        assert!(!is_expired(&credentials, get_now()));
    }

    #[test]
    fn should_keep_previous_refresh_token() {
        let now = get_now();
        let credentials = GoogleCredentials::new(
            "ya29.old".to_owned(),
            Some("1//refresh".to_owned()),
            Some(now.timestamp_millis() - 1),
        );
        let token_response = TokenResponse {
            access_token: "ya29.new".to_owned(),
            expires_in: Some(3600),
            refresh_token: None,
            scope: None,
            token_type: Some("Bearer".to_owned()),
        };

        let credentials = refreshed(&credentials, token_response, now);

        assert_eq!("ya29.new", credentials.access_token());
        assert_eq!(&Some("1//refresh".to_owned()), credentials.refresh_token());
        assert!(!is_expired(&credentials, now));
    }

    #[test]
    fn should_replace_refresh_token_when_rotated() {
        let now = get_now();
        let credentials =
            GoogleCredentials::new("ya29.old".to_owned(), Some("1//old".to_owned()), None);
        let token_response = TokenResponse {
            access_token: "ya29.new".to_owned(),
            expires_in: None,
            refresh_token: Some("1//new".to_owned()),
            scope: None,
            token_type: None,
        };

        let credentials = refreshed(&credentials, token_response, now);

        assert_eq!(&Some("1//new".to_owned()), credentials.refresh_token());
    }
}
