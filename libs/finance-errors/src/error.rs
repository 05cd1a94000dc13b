//! Service error type raised by domain and API code.

use crate::category::ErrorCategory;

/// Error raised by service code and classified at the HTTP boundary.
///
/// Each variant maps to exactly one [`ErrorCategory`]. The `Display` output of
/// classified variants is safe to show to clients; `Unclassified` may carry
/// internal details and is never echoed.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{message}")]
    MissingRequiredInput { param: String, message: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

impl ServiceError {
    /// Required parameter `param` was not supplied.
    pub fn missing(param: impl Into<String>) -> Self {
        let param = param.into();
        Self::MissingRequiredInput {
            message: format!("{param} is required"),
            param,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl std::fmt::Display) -> Self {
        Self::Unclassified(anyhow::anyhow!("{message}"))
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredInput { .. } => ErrorCategory::MissingRequiredInput,
            Self::InvalidInput(_) => ErrorCategory::InvalidInput,
            Self::InvalidState(_) => ErrorCategory::InvalidState,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Unclassified(_) => ErrorCategory::Unclassified,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(feature = "axum")]
mod axum_ext {
    use std::sync::Arc;

    use axum::extract::rejection::{JsonRejection, PathRejection};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};

    use super::ServiceError;

    /// A [`ServiceError`] parked on a response, waiting to be classified by
    /// the boundary middleware.
    #[derive(Debug, Clone)]
    pub struct RaisedError(pub Arc<ServiceError>);

    /// Responds with a bare 500 carrying the error in its extensions.
    ///
    /// Without the boundary middleware in the stack this is what the client
    /// sees, so the body stays empty.
    impl IntoResponse for ServiceError {
        fn into_response(self) -> Response {
            let mut resp = StatusCode::INTERNAL_SERVER_ERROR.into_response();
            resp.extensions_mut().insert(RaisedError(Arc::new(self)));
            resp
        }
    }

    impl From<JsonRejection> for ServiceError {
        fn from(rejection: JsonRejection) -> Self {
            Self::InvalidInput(rejection.body_text())
        }
    }

    impl From<PathRejection> for ServiceError {
        fn from(rejection: PathRejection) -> Self {
            Self::InvalidInput(rejection.body_text())
        }
    }
}

#[cfg(feature = "axum")]
pub use axum_ext::RaisedError;
