//! HTTP router assembling every queue endpoint

use axum::{routing::any, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::binding::{validate_bindings, QueueBinding};
use crate::endpoint::{handle_request, QueueEndpoint};
use crate::error::BindingError;
use crate::queue::BoundedQueue;

/// Create one isolated queue per binding and route each to its exact path.
///
/// Paths without a binding fall through to the router's 404.
pub fn create_router(
    bindings: &[QueueBinding],
    max_body_bytes: Option<usize>,
) -> Result<Router, BindingError> {
    validate_bindings(bindings)?;

    let mut router = Router::new();
    for binding in bindings {
        let mut endpoint =
            QueueEndpoint::new(binding.path.clone(), BoundedQueue::new(binding.capacity));
        if let Some(limit) = max_body_bytes {
            endpoint = endpoint.with_max_body_bytes(limit);
        }

        router = router.route(
            &binding.path,
            any(handle_request).with_state(Arc::new(endpoint)),
        );
        info!(path = %binding.path, capacity = binding.capacity, "Queue created");
    }

    Ok(router.layer(TraceLayer::new_for_http()))
}
