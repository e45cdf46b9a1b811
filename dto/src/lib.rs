pub mod appointment_request;
pub mod email;
pub mod email_outcome;
pub mod google_credentials;
pub mod login_credentials;
pub mod meeting;
