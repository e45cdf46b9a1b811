pub mod appointment_controller;
pub mod backend_controller;
pub mod calendar_controller;
pub mod catchers;
pub mod email_controller;
pub mod google_controller;
pub mod server;
pub mod session_controller;
