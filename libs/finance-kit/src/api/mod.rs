//! HTTP surface shared by the finance services: the problem-details boundary,
//! request ids, response helpers and the middleware stack.

pub mod boundary;
pub mod error_layer;
pub mod request_id;
pub mod response;
pub mod stack;

pub use boundary::{GlobalErrorHandler, ProblemSink, RequestContext};
pub use error_layer::{BoundaryState, ResponseSlot, extract_trace_id, problem_boundary_middleware};
pub use stack::apply_middleware_stack;

/// Result type returned by REST handlers
pub type ApiResult<T> = Result<T, finance_errors::ServiceError>;

/// Prelude module that re-exports common API types and utilities for handler authors
pub mod prelude {
    pub use super::ApiResult;

    pub use finance_errors::ServiceError;

    pub use super::response::Created;

    // Useful axum bits (common in handlers)
    pub use axum::{Json, http::StatusCode, response::IntoResponse};
}
