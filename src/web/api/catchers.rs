use crate::web::error::error_response;
use rocket::http::Status;
use rocket::serde::json::Value;
use rocket::{Catcher, Request};

pub fn all() -> Vec<Catcher> {
    catchers![
        bad_request,
        unauthorized,
        not_found,
        unprocessable_entity,
        internal_error,
        default_catcher
    ]
}

#[catch(400)]
fn bad_request(req: &Request) -> (Status, Value) {
    error_response(Status::BadRequest, "Malformed request", req.uri().path().as_str())
}

#[catch(401)]
fn unauthorized(req: &Request) -> (Status, Value) {
    error_response(
        Status::Unauthorized,
        "A valid session is required",
        req.uri().path().as_str(),
    )
}

#[catch(404)]
fn not_found(req: &Request) -> (Status, Value) {
    error_response(Status::NotFound, "Not found", req.uri().path().as_str())
}

#[catch(422)]
fn unprocessable_entity(req: &Request) -> (Status, Value) {
    error_response(
        Status::UnprocessableEntity,
        "The request body doesn't have the expected shape",
        req.uri().path().as_str(),
    )
}

#[catch(500)]
fn internal_error(req: &Request) -> (Status, Value) {
    error_response(
        Status::InternalServerError,
        "Internal error",
        req.uri().path().as_str(),
    )
}

#[catch(default)]
fn default_catcher(status: Status, req: &Request) -> (Status, Value) {
    error_response(status, status.reason_lossy(), req.uri().path().as_str())
}
