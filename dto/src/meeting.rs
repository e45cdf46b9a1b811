use crate::google_credentials::GoogleCredentials;
use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Getters, Serialize, Deserialize, Clone, PartialEq)]
pub struct Attendee {
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Attendee {
    pub fn new(email: String, name: Option<String>) -> Self {
        Self { email, name }
    }
}

/// A video meeting to schedule.
/// `start` and `end` are wall-clock times, to be read in `time_zone`
/// (or in the server's configured time zone when none is given).
#[derive(Debug, Getters, Serialize, Deserialize, Clone, PartialEq)]
pub struct MeetingRequest {
    summary: String,
    #[serde(default)]
    description: Option<String>,
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(default)]
    time_zone: Option<String>,
    #[serde(default)]
    attendees: Vec<Attendee>,
    #[serde(default)]
    credentials: Option<GoogleCredentials>,
}

impl MeetingRequest {
    pub fn new(
        summary: String,
        description: Option<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        time_zone: Option<String>,
        attendees: Vec<Attendee>,
    ) -> Self {
        Self {
            summary,
            description,
            start,
            end,
            time_zone,
            attendees,
            credentials: None,
        }
    }

    pub fn take_credentials(&mut self) -> Option<GoogleCredentials> {
        self.credentials.take()
    }
}

/// A created calendar event with its generated video link.
#[derive(Debug, Getters, Serialize, Deserialize, Clone, PartialEq)]
pub struct Meeting {
    event_id: String,
    meet_link: String,
    html_link: String,
}

impl Meeting {
    pub fn new(event_id: String, meet_link: String, html_link: String) -> Self {
        Self {
            event_id,
            meet_link,
            html_link,
        }
    }
}
