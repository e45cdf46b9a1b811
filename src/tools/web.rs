use crate::tools::log_message_and_return;
use crate::web::error::WebError;
use crate::web::error::WebError::CantCreateClient;
use reqwest::Client;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn build_client() -> Result<Client, WebError> {
    reqwest::ClientBuilder::new()
        .user_agent(USER_AGENT)
        .build()
        .map_err(log_message_and_return(
            "Can't build HTTP client.",
            CantCreateClient,
        ))
}
