use crate::appointment::config::AppointmentConfig;
use crate::appointment::error::ValidationError;
use crate::appointment::error::ValidationError::{InvalidDate, InvalidTime, MissingFields};
use chrono::{NaiveDate, NaiveTime};
use derive_getters::Getters;
use dto::appointment_request::AppointmentRequest;
use dto::meeting::{Attendee, MeetingRequest};
use log::debug;

pub mod config;
pub mod error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// An appointment whose required fields are all there, with date and time parsed.
#[derive(Debug, Getters, Clone, PartialEq)]
pub struct ValidAppointment {
    name: String,
    email: String,
    phone: String,
    date: NaiveDate,
    time: NaiveTime,
    store: String,
    market: Option<String>,
    notes: Option<String>,
}

/// Check that every required field is there and not blank.
/// All missing fields are reported at once.
pub fn validate(request: &AppointmentRequest) -> Result<ValidAppointment, ValidationError> {
    let required_fields = [
        ("name", request.name()),
        ("email", request.email()),
        ("phone", request.phone()),
        ("date", request.date()),
        ("time", request.time()),
        ("store", request.store()),
    ];
    let missing_fields: Vec<&'static str> = required_fields
        .iter()
        .filter(|(_, value)| non_blank(value).is_none())
        .map(|(field, _)| *field)
        .collect();
    if !missing_fields.is_empty() {
        debug!("Appointment request is incomplete [missing_fields: {missing_fields:?}]");
        return Err(MissingFields(missing_fields));
    }

    let [name, email, phone, date, time, store] =
        required_fields.map(|(_, value)| non_blank(value).unwrap_or_default().to_owned());
    let parsed_date = NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|_| InvalidDate(date))?;
    let parsed_time = NaiveTime::parse_from_str(&time, TIME_FORMAT).map_err(|_| InvalidTime(time))?;

    Ok(ValidAppointment {
        name,
        email,
        phone,
        date: parsed_date,
        time: parsed_time,
        store,
        market: non_blank(request.market()).map(str::to_owned),
        notes: non_blank(request.notes()).map(str::to_owned),
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// The calendar event for an interview: the applicant is invited,
/// and the description gathers what the recruiter needs to know beforehand.
/// Fails when the interview would end past the last representable date.
pub fn meeting_request(
    appointment: &ValidAppointment,
    config: &AppointmentConfig,
) -> Result<MeetingRequest, ValidationError> {
    let start = appointment.date.and_time(appointment.time);
    let end = start
        .checked_add_signed(config.duration())
        .ok_or_else(|| InvalidDate(appointment.date.format(DATE_FORMAT).to_string()))?;

    Ok(MeetingRequest::new(
        format!("Entrevista promotora - {}", appointment.name),
        Some(build_description(appointment)),
        start,
        end,
        None,
        vec![Attendee::new(
            appointment.email.clone(),
            Some(appointment.name.clone()),
        )],
    ))
}

fn build_description(appointment: &ValidAppointment) -> String {
    let mut lines = vec![
        format!("Candidata: {}", appointment.name),
        format!("Correo: {}", appointment.email),
        format!("Teléfono: {}", appointment.phone),
        format!("Tienda: {}", appointment.store),
    ];
    if let Some(market) = &appointment.market {
        lines.push(format!("Mercado: {market}"));
    }
    if let Some(notes) = &appointment.notes {
        lines.push(format!("Notas: {notes}"));
    }
    lines.join("\n")
}

#[cfg(test)]
impl ValidAppointment {
    pub fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }
}
