use crate::backend::config::BackendConfig;
use crate::backend::error::BackendError;
use crate::backend::proxy::{BackendResponse, forward};
use crate::backend::resource::Resource;
use crate::session::Session;
use crate::tools::log_error_and_return;
use crate::tools::web::build_client;
use crate::web::error::error_response;
use log::debug;
use reqwest::Method;
use rocket::http::uri::Origin;
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Value;
use rocket::{Request, State};
use std::io::Cursor;
use std::path::PathBuf;

type ProxyResult = Result<BackendResponse, (Status, Value)>;

impl<'r> Responder<'r, 'static> for BackendResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = Status::new(*self.status());
        let content_type = self
            .content_type()
            .as_deref()
            .and_then(ContentType::parse_flexible);
        let body = self.body().clone();

        let mut builder = Response::build();
        builder.status(status);
        if let Some(content_type) = content_type {
            builder.header(content_type);
        }
        builder.sized_body(body.len(), Cursor::new(body)).ok()
    }
}

/// Multi-step application form: the applicant becomes a backend user.
#[post("/applications", data = "<body>")]
pub async fn submit_application(backend_config: &State<BackendConfig>, body: String) -> ProxyResult {
    proxy(backend_config, Method::POST, "users".to_owned(), None, Some(body)).await
}

/// Interview slots still open for booking.
#[get("/slots")]
pub async fn available_slots(backend_config: &State<BackendConfig>, uri: &Origin<'_>) -> ProxyResult {
    proxy(backend_config, Method::GET, "slots".to_owned(), query_of(uri), None).await
}

#[get("/admin/<resource>/<path..>")]
pub async fn admin_get(
    _session: Session,
    backend_config: &State<BackendConfig>,
    uri: &Origin<'_>,
    resource: &str,
    path: PathBuf,
) -> ProxyResult {
    let backend_path = admin_path(resource, path)?;
    proxy(backend_config, Method::GET, backend_path, query_of(uri), None).await
}

#[post("/admin/<resource>/<path..>", data = "<body>")]
pub async fn admin_post(
    _session: Session,
    backend_config: &State<BackendConfig>,
    uri: &Origin<'_>,
    resource: &str,
    path: PathBuf,
    body: String,
) -> ProxyResult {
    let backend_path = admin_path(resource, path)?;
    proxy(backend_config, Method::POST, backend_path, query_of(uri), Some(body)).await
}

#[put("/admin/<resource>/<path..>", data = "<body>")]
pub async fn admin_put(
    _session: Session,
    backend_config: &State<BackendConfig>,
    uri: &Origin<'_>,
    resource: &str,
    path: PathBuf,
    body: String,
) -> ProxyResult {
    let backend_path = admin_path(resource, path)?;
    proxy(backend_config, Method::PUT, backend_path, query_of(uri), Some(body)).await
}

#[delete("/admin/<resource>/<path..>")]
pub async fn admin_delete(
    _session: Session,
    backend_config: &State<BackendConfig>,
    uri: &Origin<'_>,
    resource: &str,
    path: PathBuf,
) -> ProxyResult {
    let backend_path = admin_path(resource, path)?;
    proxy(backend_config, Method::DELETE, backend_path, query_of(uri), None).await
}

/// Where the logged-in user stands in the video training.
#[get("/training/progress")]
pub async fn training_progress(session: Session, backend_config: &State<BackendConfig>) -> ProxyResult {
    let path = progress_path(&session);
    proxy(backend_config, Method::GET, path, None, None).await
}

#[put("/training/progress", data = "<body>")]
pub async fn update_training_progress(
    session: Session,
    backend_config: &State<BackendConfig>,
    body: String,
) -> ProxyResult {
    let path = progress_path(&session);
    proxy(backend_config, Method::PUT, path, None, Some(body)).await
}

fn progress_path(session: &Session) -> String {
    format!("users/{}/progress", session.username())
}

fn query_of<'a>(uri: &'a Origin<'_>) -> Option<&'a str> {
    uri.query().map(|query| query.as_str())
}

/// Only known resources are relayed; the rest of the path goes along untouched.
fn admin_path(resource: &str, path: PathBuf) -> Result<String, (Status, Value)> {
    let resource = resource.parse::<Resource>().map_err(|error| {
        debug!("Admin request onto an unknown resource [error: {error}]");
        error_response(Status::NotFound, "Unknown resource", error.to_string())
    })?;
    let segments: Vec<&str> = path.iter().filter_map(|segment| segment.to_str()).collect();
    Ok(std::iter::once(resource.as_str())
        .chain(segments)
        .collect::<Vec<&str>>()
        .join("/"))
}

async fn proxy(
    backend_config: &BackendConfig,
    method: Method,
    path: String,
    query: Option<&str>,
    body: Option<String>,
) -> ProxyResult {
    let client = build_client().map_err(log_error_and_return(error_response(
        Status::InternalServerError,
        "Internal error",
        Value::Null,
    )))?;
    forward(&client, backend_config, method, &path, query, body)
        .await
        .map_err(backend_failure)
}

fn backend_failure(error: BackendError) -> (Status, Value) {
    error_response(
        Status::BadGateway,
        "The backend can't be reached",
        error.to_string(),
    )
}
