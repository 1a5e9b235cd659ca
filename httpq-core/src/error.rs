//! Error types for queue bindings and queue endpoints

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Invalid `(path, capacity)` binding, detected before any route is registered
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("queue path must start with '/': {0:?}")]
    MissingLeadingSlash(String),
    #[error("queue path must be a literal path without ':', '*', '{{' or '}}': {0:?}")]
    PatternInPath(String),
    #[error("queue path is bound more than once: {0}")]
    DuplicatePath(String),
}

/// A request on a bound path that is refused without touching the queue
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The POST body could not be read to the end
    #[error("Bad Request")]
    BadRequest(#[source] axum::Error),

    #[error("Method Not Allowed")]
    MethodNotAllowed(Method),
}

impl EndpointError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(format!("{self}\n")));
        *response.status_mut() = self.status();

        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        if let Self::MethodNotAllowed(_) = self {
            headers.insert(header::ALLOW, HeaderValue::from_static("GET, POST"));
        }
        response
    }
}
