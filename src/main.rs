mod appointment;
mod backend;
#[cfg(feature = "demo")]
mod demo_mock_server;
mod email;
mod error;
mod google;
mod session;
mod tools;
mod web;

#[macro_use]
extern crate rocket;

use crate::web::start_servers;
use log::error;

#[launch]
async fn rocket() -> _ {
    env_logger::init();

    #[cfg(feature = "demo")]
    demo_mock_server::init_demo().await;

    match start_servers() {
        Ok(rocket) => rocket,
        Err(error) => {
            error!("Initialization failed, aborting.\n{error:#?}");
            panic!("Initialization failed, aborting.");
        }
    }
}
