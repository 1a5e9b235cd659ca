//! HTTP handler binding one queue to one path
//!
//! GET consumes, POST produces. Both may suspend the request for as long as
//! the queue is empty (GET) or full (POST); there is no timeout.

use axum::{
    body::{self, Body},
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::EndpointError;
use crate::queue::{BoundedQueue, Entry};

/// A queue together with the path it is served on
#[derive(Debug)]
pub struct QueueEndpoint {
    path: String,
    queue: BoundedQueue,
    max_body_bytes: usize,
}

impl QueueEndpoint {
    pub fn new(path: impl Into<String>, queue: BoundedQueue) -> Self {
        Self {
            path: path.into(),
            queue,
            max_body_bytes: usize::MAX,
        }
    }

    /// Reject POST bodies longer than `limit` bytes with 400
    #[must_use]
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn queue(&self) -> &BoundedQueue {
        &self.queue
    }
}

/// Dispatch a request on a bound path by method
pub async fn handle_request(
    State(endpoint): State<Arc<QueueEndpoint>>,
    method: Method,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let remote = connect_info.map_or_else(
        || "unknown".to_string(),
        |ConnectInfo(addr)| addr.to_string(),
    );

    let result = match method {
        Method::GET => Ok(handle_dequeue(&endpoint, &remote).await),
        Method::POST => handle_enqueue(&endpoint, &remote, &headers, body).await,
        other => Err(EndpointError::MethodNotAllowed(other)),
    };

    result.unwrap_or_else(|e| {
        debug!(path = %endpoint.path, remote = %remote, error = %e, "Request refused");
        e.into_response()
    })
}

async fn handle_dequeue(endpoint: &QueueEndpoint, remote: &str) -> Response {
    let entry = endpoint.queue.dequeue().await;
    info!(path = %endpoint.path, remote = %remote, "Dequeue");

    let mut response = Response::new(Body::from(entry.payload));
    if let Some(content_type) = media_type_header(&entry.media_type) {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    response
}

async fn handle_enqueue(
    endpoint: &QueueEndpoint,
    remote: &str,
    headers: &HeaderMap,
    body: Body,
) -> Result<Response, EndpointError> {
    let payload = body::to_bytes(body, endpoint.max_body_bytes)
        .await
        .map_err(EndpointError::BadRequest)?;

    let media_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    endpoint.queue.enqueue(Entry::new(media_type, payload)).await;
    info!(path = %endpoint.path, remote = %remote, "Enqueue");

    Ok(StatusCode::ACCEPTED.into_response())
}

fn media_type_header(media_type: &str) -> Option<HeaderValue> {
    if media_type.is_empty() {
        return None;
    }
    HeaderValue::from_str(media_type).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_header() {
        assert_eq!(
            media_type_header("text/plain").as_ref().map(HeaderValue::as_bytes),
            Some(&b"text/plain"[..])
        );
        assert!(media_type_header("").is_none());
        assert!(media_type_header("bad\nvalue").is_none());
    }

    #[test]
    fn test_endpoint_accessors() {
        let endpoint =
            QueueEndpoint::new("/jobs", BoundedQueue::new(5)).with_max_body_bytes(16);

        assert_eq!(endpoint.path(), "/jobs");
        assert_eq!(endpoint.queue().capacity(), 5);
        assert_eq!(endpoint.max_body_bytes, 16);
    }

    #[tokio::test]
    async fn test_post_then_get_without_connection_info() {
        let endpoint = Arc::new(QueueEndpoint::new("/jobs", BoundedQueue::new(1)));

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let response = handle_request(
            State(endpoint.clone()),
            Method::POST,
            None,
            headers,
            Body::from("hello"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(endpoint.queue().len(), 1);

        let response = handle_request(
            State(endpoint.clone()),
            Method::GET,
            None,
            HeaderMap::new(),
            Body::empty(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");

        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"hello");
        assert!(endpoint.queue().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_body_is_bad_request() {
        let endpoint =
            Arc::new(QueueEndpoint::new("/jobs", BoundedQueue::new(1)).with_max_body_bytes(4));

        let response = handle_request(
            State(endpoint.clone()),
            Method::POST,
            None,
            HeaderMap::new(),
            Body::from("too long"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(endpoint.queue().is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_empty() {
        let endpoint = Arc::new(QueueEndpoint::new("/", BoundedQueue::unbounded()));

        handle_request(
            State(endpoint.clone()),
            Method::POST,
            None,
            HeaderMap::new(),
            Body::from("raw"),
        )
        .await;

        let response = handle_request(
            State(endpoint.clone()),
            Method::GET,
            None,
            HeaderMap::new(),
            Body::empty(),
        )
        .await;
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn test_put_is_not_allowed() {
        let endpoint = Arc::new(QueueEndpoint::new("/jobs", BoundedQueue::new(1)));

        let response = handle_request(
            State(endpoint.clone()),
            Method::PUT,
            None,
            HeaderMap::new(),
            Body::from("ignored"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(endpoint.queue().is_empty());
    }
}
