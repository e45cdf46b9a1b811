use crate::session::error::SessionError;
use crate::session::error::SessionError::{
    InvalidTimestamp, MalformedToken, NotBase64, NotUtf8,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use log::debug;

/// 24 hours.
pub const SESSION_LIFESPAN_MS: i64 = 24 * 60 * 60 * 1000;
const SEPARATOR: char = ':';

/// Proof that a user logged in at some point.
/// On the wire, it is the base64 encoding of `username:timestamp`, the timestamp being in milliseconds.
#[derive(Debug, Getters, Clone, PartialEq)]
pub struct SessionToken {
    username: String,
    issued_at: i64,
}

impl SessionToken {
    pub fn new(username: String, issued_at: DateTime<Utc>) -> Self {
        Self {
            username,
            issued_at: issued_at.timestamp_millis(),
        }
    }

    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}{SEPARATOR}{}", self.username, self.issued_at))
    }

    /// The username may itself contain the separator, so the split happens on the last one.
    pub fn decode(value: &str) -> Result<Self, SessionError> {
        let bytes = STANDARD.decode(value.trim()).map_err(|_| NotBase64)?;
        let decoded = String::from_utf8(bytes).map_err(|_| NotUtf8)?;
        let (username, timestamp) = decoded.rsplit_once(SEPARATOR).ok_or(MalformedToken)?;
        if username.is_empty() {
            return Err(MalformedToken);
        }
        let issued_at = timestamp
            .parse::<i64>()
            .map_err(|_| InvalidTimestamp(timestamp.to_owned()))?;

        Ok(Self {
            username: username.to_owned(),
            issued_at,
        })
    }

    /// A token is valid for 24 hours after being issued.
    /// Tokens claiming to come from the future are rejected.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        let age = now.timestamp_millis().checked_sub(self.issued_at);
        let is_valid = age.is_some_and(|age| (0..SESSION_LIFESPAN_MS).contains(&age));
        if !is_valid {
            debug!("Session token rejected [username: {}, age_ms: {age:?}]", self.username);
        }
        is_valid
    }

    pub fn expires_at(&self) -> i64 {
        self.issued_at.saturating_add(SESSION_LIFESPAN_MS)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use chrono::TimeDelta;
    use crate::google::credentials::tests::get_now;
    use parameterized::{ide, parameterized};

    ide!();

    pub const USERNAME: &str = "admin";

    #[test]
    fn should_encode_token() {
        let token = SessionToken {
            username: USERNAME.to_owned(),
            issued_at: 1741608000000,
        };

        assert_eq!(STANDARD.encode("admin:1741608000000"), token.encode());
    }

    #[test]
    fn should_decode_encoded_token() {
        let token = SessionToken::new(USERNAME.to_owned(), get_now());

        let decoded = SessionToken::decode(&token.encode()).unwrap();

        assert_eq!(token, decoded);
    }

    #[test]
    fn should_split_on_last_separator() {
        let value = STANDARD.encode("team:lead:1741608000000");

        let token = SessionToken::decode(&value).unwrap();

        assert_eq!("team:lead", token.username());
        assert_eq!(&1741608000000, token.issued_at());
    }

    #[parameterized(
        value = {
            "not base64!".to_owned(),
            STANDARD.encode([0xff_u8, 0xfe, 0x3a, 0x31]),
            STANDARD.encode("admin"),
            STANDARD.encode(":1741608000000"),
            STANDARD.encode("admin:yesterday"),
        },
        expected_error = {
            NotBase64,
            NotUtf8,
            MalformedToken,
            MalformedToken,
            InvalidTimestamp("yesterday".to_owned()),
        }
    )]
    fn should_fail_to_decode_token(value: String, expected_error: SessionError) {
        assert_eq!(expected_error, SessionToken::decode(&value).unwrap_err());
    }

    #[parameterized(
        age = {
            TimeDelta::zero(),
            TimeDelta::hours(1),
            TimeDelta::hours(24) - TimeDelta::milliseconds(1),
            TimeDelta::hours(24),
            TimeDelta::hours(25),
            TimeDelta::minutes(-1),
        },
        expected_validity = {true, true, true, false, false, false}
    )]
    fn should_check_token_validity(age: TimeDelta, expected_validity: bool) {
        let now = get_now();
        let token = SessionToken::new(USERNAME.to_owned(), now - age);

        assert_eq!(expected_validity, token.is_valid(now));
    }

    #[parameterized(
        issued_at = {i64::MIN, i64::MAX},
        expected_expiry = {i64::MIN + SESSION_LIFESPAN_MS, i64::MAX}
    )]
    fn should_reject_token_with_extreme_timestamp(issued_at: i64, expected_expiry: i64) {
        let value = STANDARD.encode(format!("{USERNAME}:{issued_at}"));
        let token = SessionToken::decode(&value).unwrap();

        assert!(!token.is_valid(get_now()));
        assert_eq!(expected_expiry, token.expires_at());
    }

    #[test]
    fn should_compute_expiry() {
        let now = get_now();
        let token = SessionToken::new(USERNAME.to_owned(), now);

        assert_eq!((now + TimeDelta::hours(24)).timestamp_millis(), token.expires_at());
    }
}
