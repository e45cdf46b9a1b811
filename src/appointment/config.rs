use crate::tools::env_args::retrieve_parsed_arg_value;
use chrono::Duration;
use derive_getters::Getters;

const APPOINTMENT_DURATION_ARG: &str = "--appointment-duration";
const DEFAULT_APPOINTMENT_DURATION: u32 = 30;

/// How interviews get scheduled.
#[derive(Debug, Getters, Clone, PartialEq)]
pub struct AppointmentConfig {
    duration_minutes: u32,
}

impl AppointmentConfig {
    pub fn new(duration_minutes: u32) -> Self {
        Self { duration_minutes }
    }

    /// A zero duration makes no sense for a meeting, so it falls back to the default.
    pub fn from_args() -> Self {
        match retrieve_parsed_arg_value(APPOINTMENT_DURATION_ARG, DEFAULT_APPOINTMENT_DURATION) {
            0 => Self::default(),
            duration_minutes => Self::new(duration_minutes),
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }
}

impl Default for AppointmentConfig {
    fn default() -> Self {
        Self::new(DEFAULT_APPOINTMENT_DURATION)
    }
}
