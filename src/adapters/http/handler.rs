use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{self, HeaderValue};
use hyper::{Method, Request, Response, StatusCode};
use thiserror::Error;

use super::codec::{
    decode_task_body, encode_month, encode_task, CodecError, CodecResult, StatusToken,
    EMPTY_OBJECT,
};
use super::router::{route, Route};
use crate::domain::TaskId;
use crate::ports::TaskStore;

pub type ResponseBody = Full<Bytes>;

const JSON: &str = "application/json";
const PLAIN_TEXT: &str = "text/plain";
const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Anything that ends a connection without a response.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Failed to read request body: {0}")]
    Body(#[from] hyper::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Turns one request into one response against the shared store.
pub struct CalendarHandler {
    store: Arc<dyn TaskStore>,
}

impl CalendarHandler {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        request: Request<Incoming>,
    ) -> Result<Response<ResponseBody>, ConnectionError> {
        let (parts, body) = request.into_parts();
        let body = body.collect().await?.to_bytes();

        Ok(self.respond(&parts.method, parts.uri.path(), &body).await?)
    }

    pub async fn respond(
        &self,
        method: &Method,
        path: &str,
        body: &[u8],
    ) -> CodecResult<Response<ResponseBody>> {
        let route = route(method, path);
        tracing::debug!(%method, path, ?route, "Handling request");

        let response = match route {
            Route::Preflight => build(StatusCode::NO_CONTENT, JSON, Bytes::new()),
            Route::ListMonth => {
                let days = self.store.list_all().await;
                build(StatusCode::OK, JSON, encode_month(days)?)
            }
            Route::AddTask => self.add_task(body).await?,
            Route::UpdateTask(id) => self.update_task(id, body).await,
            Route::DeleteTask(id) => {
                // An id that was never assignable has nothing to remove.
                let removed = match id {
                    Some(id) => self.store.remove(id).await,
                    None => true,
                };
                build(StatusCode::OK, JSON, StatusToken::from(removed).as_str())
            }
            Route::NotFound => build(StatusCode::NOT_FOUND, PLAIN_TEXT, "Not Found"),
        };

        Ok(response)
    }

    async fn add_task(&self, body: &[u8]) -> CodecResult<Response<ResponseBody>> {
        let encoded = match decode_task_body(body) {
            Ok(task) => encode_task(self.store.add(&task.date, &task.text).await)?,
            Err(e) => {
                tracing::debug!("Rejected new task: {}", e);
                EMPTY_OBJECT.to_string()
            }
        };
        Ok(build(StatusCode::OK, JSON, encoded))
    }

    async fn update_task(&self, id: Option<TaskId>, body: &[u8]) -> Response<ResponseBody> {
        let updated = match (id, decode_task_body(body)) {
            (Some(id), Ok(task)) => self.store.update(id, &task.date, &task.text).await,
            (None, _) => false,
            (_, Err(e)) => {
                tracing::debug!("Rejected task update: {}", e);
                false
            }
        };
        build(StatusCode::OK, JSON, StatusToken::from(updated).as_str())
    }
}

// Status 200 is used for logical failures too; clients read the body.
fn build(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
) -> Response<ResponseBody> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
