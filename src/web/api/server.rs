use crate::appointment::config::AppointmentConfig;
use crate::backend::config::BackendConfig;
use crate::email::config::EmailConfig;
use crate::email::mailer::Mailer;
use crate::email::templates::{EmailTemplates, TEMPLATES_GLOB};
use crate::error::Result;
use crate::google::config::GoogleConfig;
use crate::web::api::{
    appointment_controller, backend_controller, calendar_controller, catchers, email_controller,
    google_controller, session_controller,
};
use crate::web::server::Server;
use log::info;
use rocket::{Build, Rocket};
use std::sync::Arc;

/// Everything the `/api` endpoints need, built once at start-up and read-only afterwards.
pub struct ApiServer {
    google_config: GoogleConfig,
    email_config: EmailConfig,
    backend_config: BackendConfig,
    appointment_config: AppointmentConfig,
    mailer: Arc<dyn Mailer>,
    templates: EmailTemplates,
}

impl ApiServer {
    pub fn new(
        google_config: GoogleConfig,
        email_config: EmailConfig,
        backend_config: BackendConfig,
        appointment_config: AppointmentConfig,
        mailer: Arc<dyn Mailer>,
        templates: EmailTemplates,
    ) -> Self {
        Self {
            google_config,
            email_config,
            backend_config,
            appointment_config,
            mailer,
            templates,
        }
    }

    pub fn from_args() -> Result<Self> {
        let google_config = build_google_config()?;
        let email_config = EmailConfig::from_args()?;
        let backend_config = build_backend_config()?;
        let appointment_config = AppointmentConfig::from_args();
        let templates = EmailTemplates::load(TEMPLATES_GLOB)?;
        let mailer = build_mailer(&email_config);
        info!(
            "API configured [google: {google_config:?}, email: {email_config:?}, backend: {backend_config:?}, appointment: {appointment_config:?}]"
        );

        Ok(Self::new(
            google_config,
            email_config,
            backend_config,
            appointment_config,
            mailer,
            templates,
        ))
    }
}

impl Server for ApiServer {
    fn configure(self: Box<Self>, rocket_build: Rocket<Build>) -> Rocket<Build> {
        rocket_build
            .manage(self.google_config)
            .manage(self.email_config)
            .manage(self.backend_config)
            .manage(self.appointment_config)
            .manage(self.mailer)
            .manage(self.templates)
            .mount(
                "/api/",
                routes![
                    appointment_controller::create_appointment,
                    calendar_controller::create_meeting,
                    calendar_controller::create_meet_link,
                    email_controller::send_email,
                    google_controller::authorize,
                    google_controller::callback,
                    session_controller::login,
                    session_controller::current_session,
                    session_controller::logout,
                    backend_controller::submit_application,
                    backend_controller::available_slots,
                    backend_controller::admin_get,
                    backend_controller::admin_post,
                    backend_controller::admin_put,
                    backend_controller::admin_delete,
                    backend_controller::training_progress,
                    backend_controller::update_training_progress,
                ],
            )
            .register("/api", catchers::all())
    }
}

#[cfg(not(feature = "demo"))]
fn build_google_config() -> Result<GoogleConfig> {
    Ok(GoogleConfig::from_args()?)
}

#[cfg(not(feature = "demo"))]
fn build_backend_config() -> Result<BackendConfig> {
    Ok(BackendConfig::from_args()?)
}

#[cfg(not(feature = "demo"))]
fn build_mailer(email_config: &EmailConfig) -> Arc<dyn Mailer> {
    Arc::new(crate::email::mailer::SmtpMailer::new(email_config.clone()))
}

#[cfg(feature = "demo")]
fn build_google_config() -> Result<GoogleConfig> {
    Ok(crate::demo_mock_server::demo_google_config())
}

#[cfg(feature = "demo")]
fn build_backend_config() -> Result<BackendConfig> {
    Ok(crate::demo_mock_server::demo_backend_config())
}

#[cfg(feature = "demo")]
fn build_mailer(_email_config: &EmailConfig) -> Arc<dyn Mailer> {
    Arc::new(crate::demo_mock_server::LoggingMailer)
}
