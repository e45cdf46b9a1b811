use crate::session::token::SessionToken;
use chrono::Utc;
use derive_getters::Getters;
use log::debug;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest, Request};

pub mod error;
pub mod token;

pub const SESSION_COOKIE: &str = "Promotoras-Session";

/// A logged-in user.
#[derive(Debug, Getters, Clone, PartialEq)]
pub struct Session {
    token: SessionToken,
}

impl Session {
    pub fn username(&self) -> &str {
        self.token.username()
    }
}

/// Endpoints behind `/api/admin` and `/api/training` require a [Session] parameter.
/// Rocket summons this guard to check the `Promotoras-Session` private cookie holds a token
/// issued less than 24 hours ago.
/// If it doesn't, the request is forwarded with an Unauthorized status.
#[rocket::async_trait]
impl<'r> FromRequest<'r> for Session {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let Some(cookie) = req.cookies().get_private(SESSION_COOKIE) else {
            return Outcome::Forward(Status::Unauthorized);
        };
        match SessionToken::decode(cookie.value()) {
            Ok(token) if token.is_valid(Utc::now()) => Outcome::Success(Session { token }),
            Ok(_) => Outcome::Forward(Status::Unauthorized),
            Err(error) => {
                debug!("Unreadable session cookie [error: {error}]");
                Outcome::Forward(Status::Unauthorized)
            }
        }
    }
}
