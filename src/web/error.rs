use rocket::http::Status;
use rocket::serde::json::{Value, json};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WebError {
    #[error("Client couldn't be created.")]
    CantCreateClient,
}

/// The JSON body every failing endpoint answers with.
pub fn error_response<D: Serialize>(status: Status, error: &str, details: D) -> (Status, Value) {
    (status, json!({"error": error, "details": details}))
}
