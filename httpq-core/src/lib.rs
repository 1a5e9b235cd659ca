//! Core of httpq: bounded FIFO queues exposed over plain HTTP
//!
//! - [`BoundedQueue`]: in-memory FIFO with capacity backpressure
//! - [`QueueEndpoint`]: GET dequeues, POST enqueues, anything else is 405
//! - [`create_router`]: one isolated queue per configured path

pub mod binding;
pub mod endpoint;
pub mod error;
pub mod queue;
pub mod router;

pub use binding::QueueBinding;
pub use endpoint::{handle_request, QueueEndpoint};
pub use error::{BindingError, EndpointError};
pub use queue::{BoundedQueue, Entry};
pub use router::create_router;
