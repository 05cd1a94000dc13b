//! Problem handlers: one per error category plus the catch-all fallback.

use crate::catalog::{self, ErrDef};
use crate::category::ErrorCategory;
use crate::error::ServiceError;
use crate::problem::Problem;

/// Failure raised by a handler while building a problem.
#[derive(Debug, thiserror::Error)]
#[error("{handler} could not build a problem for {category}: {reason}")]
pub struct HandlerError {
    pub handler: &'static str,
    pub category: ErrorCategory,
    pub reason: String,
}

/// Maps errors of one category to a [`Problem`].
///
/// Implementations hold no per-request state and are shared across requests.
pub trait ProblemHandler: Send + Sync {
    /// Category this handler is registered under.
    fn category(&self) -> ErrorCategory;

    /// Builds the problem for `error`.
    ///
    /// # Errors
    /// Returns [`HandlerError`] when the problem cannot be built.
    fn handle(&self, error: &ServiceError) -> Result<Problem, HandlerError>;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Handler for a client-caused category: fixed status, title and type, with
/// the error message as detail.
#[derive(Debug, Clone, Copy)]
pub struct CategoryHandler {
    category: ErrorCategory,
    def: ErrDef,
}

impl CategoryHandler {
    #[must_use]
    pub const fn new(category: ErrorCategory, def: ErrDef) -> Self {
        Self { category, def }
    }

    #[must_use]
    pub const fn missing_required_input() -> Self {
        Self::new(ErrorCategory::MissingRequiredInput, catalog::BAD_REQUEST)
    }

    #[must_use]
    pub const fn invalid_input() -> Self {
        Self::new(ErrorCategory::InvalidInput, catalog::BAD_REQUEST)
    }

    #[must_use]
    pub const fn invalid_state() -> Self {
        Self::new(ErrorCategory::InvalidState, catalog::CONFLICT)
    }

    #[must_use]
    pub const fn not_found() -> Self {
        Self::new(ErrorCategory::NotFound, catalog::NOT_FOUND)
    }

    /// Handlers for every classified category.
    #[must_use]
    pub const fn defaults() -> [Self; 4] {
        [
            Self::missing_required_input(),
            Self::invalid_input(),
            Self::invalid_state(),
            Self::not_found(),
        ]
    }
}

impl ProblemHandler for CategoryHandler {
    fn category(&self) -> ErrorCategory {
        self.category
    }

    fn handle(&self, error: &ServiceError) -> Result<Problem, HandlerError> {
        if let ServiceError::MissingRequiredInput { param, .. } = error {
            tracing::warn!(category = %self.category, param = %param, "{error}");
        } else {
            tracing::warn!(category = %self.category, "{error}");
        }
        Ok(self.def.problem(error.to_string()))
    }

    fn name(&self) -> &'static str {
        self.category.as_str()
    }
}

/// Catch-all for categories without a registered handler.
///
/// Always answers 500 with a fixed title and detail; the original message is
/// logged but never copied into the problem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackHandler;

impl FallbackHandler {
    pub fn problem(&self, error: &ServiceError) -> Problem {
        tracing::error!(
            category = %error.category(),
            error = ?error,
            "Unhandled error: {error}"
        );
        catalog::INTERNAL_SERVER_ERROR.problem(catalog::INTERNAL_SERVER_ERROR_DETAIL)
    }
}

impl ProblemHandler for FallbackHandler {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Unclassified
    }

    fn handle(&self, error: &ServiceError) -> Result<Problem, HandlerError> {
        Ok(self.problem(error))
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}
