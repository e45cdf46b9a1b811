use crate::error::Result;
use crate::web::server::build_server;
use rocket::{Build, Rocket};

mod api;
pub mod error;
mod server;

pub fn start_servers() -> Result<Rocket<Build>> {
    build_server()
}
