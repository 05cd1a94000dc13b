//! Category-keyed registry that picks the most specific handler for an error.

use std::collections::HashMap;
use std::sync::Arc;

use crate::category::ErrorCategory;
use crate::error::ServiceError;
use crate::handler::{CategoryHandler, FallbackHandler, HandlerError, ProblemHandler};
use crate::problem::Problem;

/// Classification failed inside a handler.
#[derive(Debug, thiserror::Error)]
#[error("failed to classify {category} error: {source}")]
pub struct ClassifyError {
    /// Category of the error being classified.
    pub category: ErrorCategory,
    #[source]
    pub source: HandlerError,
}

/// Immutable map from category to handler, built once at startup.
///
/// Lookup walks the error's category lineage from most specific to broadest
/// and uses the first registered handler, so registration order never
/// matters. Errors with no handler anywhere in their lineage go to the
/// fallback. `Unclassified` always belongs to the fallback and cannot be
/// registered.
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<ErrorCategory, Arc<dyn ProblemHandler>>,
    fallback: FallbackHandler,
}

impl HandlerRegistry {
    #[must_use]
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// Registry with a handler for every classified category.
    #[must_use]
    pub fn with_defaults() -> Self {
        CategoryHandler::defaults()
            .into_iter()
            .fold(Self::builder(), HandlerRegistryBuilder::register)
            .build()
    }

    /// Handler that [`classify`](Self::classify) would use for `category`,
    /// or `None` when it would fall back.
    #[must_use]
    pub fn resolve(&self, category: ErrorCategory) -> Option<&Arc<dyn ProblemHandler>> {
        category
            .lineage()
            .find_map(|candidate| self.handlers.get(&candidate))
    }

    /// Builds the problem for `error` with the most specific matching handler.
    ///
    /// # Errors
    /// Returns [`ClassifyError`] when the selected handler fails.
    pub fn classify(&self, error: &ServiceError) -> Result<Problem, ClassifyError> {
        let category = error.category();
        let Some(handler) = self.resolve(category) else {
            return Ok(self.fallback.problem(error));
        };

        tracing::debug!(%category, handler = handler.name(), "Classifying error");
        handler
            .handle(error)
            .map_err(|source| ClassifyError { category, source })
    }

    #[must_use]
    pub fn registered(&self) -> Vec<ErrorCategory> {
        let mut categories: Vec<_> = self.handlers.keys().copied().collect();
        categories.sort_unstable();
        categories
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.registered())
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct HandlerRegistryBuilder {
    handlers: HashMap<ErrorCategory, Arc<dyn ProblemHandler>>,
}

impl HandlerRegistryBuilder {
    /// Registers `handler` under its own category, replacing any previous one.
    ///
    /// Handlers for [`ErrorCategory::Unclassified`] are ignored: that
    /// category is answered by the non-leaking fallback only.
    #[must_use]
    pub fn register<H: ProblemHandler + 'static>(self, handler: H) -> Self {
        self.register_arc(Arc::new(handler))
    }

    #[must_use]
    pub fn register_arc(mut self, handler: Arc<dyn ProblemHandler>) -> Self {
        let category = handler.category();
        if category == ErrorCategory::Unclassified {
            tracing::warn!(
                handler = handler.name(),
                "Ignoring problem handler for unclassified errors; the fallback owns them"
            );
            return self;
        }
        if let Some(previous) = self.handlers.insert(category, handler) {
            tracing::warn!(%category, replaced = previous.name(), "Problem handler replaced");
        }
        self
    }

    #[must_use]
    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            handlers: self.handlers,
            fallback: FallbackHandler,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::catalog;
    use http::StatusCode;
    use tracing_test::traced_test;

    struct Broken;

    impl ProblemHandler for Broken {
        fn category(&self) -> ErrorCategory {
            ErrorCategory::InvalidState
        }

        fn handle(&self, _error: &ServiceError) -> Result<Problem, HandlerError> {
            Err(HandlerError {
                handler: "broken",
                category: ErrorCategory::InvalidState,
                reason: "template missing".to_owned(),
            })
        }
    }

    #[test]
    fn default_registry_maps_every_category() {
        let registry = HandlerRegistry::with_defaults();
        let cases = [
            (ServiceError::missing("id"), StatusCode::BAD_REQUEST, catalog::BAD_REQUEST),
            (ServiceError::invalid_input("amount must be positive"), StatusCode::BAD_REQUEST, catalog::BAD_REQUEST),
            (ServiceError::invalid_state("account is closed"), StatusCode::CONFLICT, catalog::CONFLICT),
            (ServiceError::not_found("currency 'XXX' not found"), StatusCode::NOT_FOUND, catalog::NOT_FOUND),
        ];

        for (error, status, def) in cases {
            let message = error.to_string();
            let problem = registry.classify(&error).unwrap();
            assert_eq!(problem.status, status, "{message}");
            assert_eq!(problem.title, def.title, "{message}");
            assert_eq!(problem.type_url, def.type_url, "{message}");
            assert_eq!(problem.detail, message);
        }
    }

    #[test]
    fn missing_input_scenario() {
        let problem = HandlerRegistry::with_defaults()
            .classify(&ServiceError::missing("id"))
            .unwrap();

        assert_eq!(problem.status, StatusCode::BAD_REQUEST);
        assert_eq!(problem.title, "Некорректные параметры запроса");
        assert_eq!(problem.detail, "id is required");
        assert_eq!(
            problem.type_url,
            "https://tools.ietf.org/html/rfc7231#section-6.5.1"
        );
    }

    #[test]
    fn unclassified_goes_to_fallback() {
        let registry = HandlerRegistry::with_defaults();
        for message in ["", "boom", "SELECT * FROM users; -- syntax error"] {
            let problem = registry.classify(&ServiceError::internal(message)).unwrap();
            assert_eq!(problem.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(problem.title, "Внутренняя ошибка сервера");
            assert_eq!(problem.detail, "Произошла непредвиденная ошибка сервера");
        }
    }

    #[test]
    fn most_specific_handler_wins_regardless_of_order() {
        let specific = CategoryHandler::new(
            ErrorCategory::MissingRequiredInput,
            catalog::ErrDef {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                title: "Missing",
                type_url: "about:missing",
            },
        );

        let forward = HandlerRegistry::builder()
            .register(specific)
            .register(CategoryHandler::invalid_input())
            .build();
        let reverse = HandlerRegistry::builder()
            .register(CategoryHandler::invalid_input())
            .register(specific)
            .build();

        for registry in [forward, reverse] {
            let problem = registry.classify(&ServiceError::missing("id")).unwrap();
            assert_eq!(problem.status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(problem.title, "Missing");
        }
    }

    #[test]
    fn broader_handler_used_when_specific_absent() {
        let registry = HandlerRegistry::builder()
            .register(CategoryHandler::invalid_input())
            .build();

        let problem = registry.classify(&ServiceError::missing("name")).unwrap();
        assert_eq!(problem.status, StatusCode::BAD_REQUEST);
        assert_eq!(problem.detail, "name is required");
    }

    #[test]
    fn unregistered_category_falls_back() {
        let registry = HandlerRegistry::builder()
            .register(CategoryHandler::invalid_input())
            .build();

        assert!(registry.resolve(ErrorCategory::InvalidState).is_none());
        let problem = registry
            .classify(&ServiceError::invalid_state("account is closed"))
            .unwrap();
        assert_eq!(problem.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(problem.detail, catalog::INTERNAL_SERVER_ERROR_DETAIL);
    }

    #[test]
    #[traced_test]
    fn unclassified_handler_cannot_replace_fallback() {
        let echoing = CategoryHandler::new(ErrorCategory::Unclassified, catalog::BAD_REQUEST);
        let registry = HandlerRegistry::builder()
            .register(echoing)
            .register(CategoryHandler::invalid_input())
            .build();

        assert_eq!(registry.registered(), vec![ErrorCategory::InvalidInput]);
        assert!(registry.resolve(ErrorCategory::Unclassified).is_none());
        assert!(registry.resolve(ErrorCategory::InvalidState).is_none());

        let problem = registry
            .classify(&ServiceError::internal("password=hunter2"))
            .unwrap();
        assert_eq!(problem.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(problem.detail, catalog::INTERNAL_SERVER_ERROR_DETAIL);
        assert!(!serde_json::to_string(&problem).unwrap().contains("hunter2"));
        assert!(logs_contain("Ignoring problem handler for unclassified errors"));
    }

    #[test]
    fn handler_failure_is_reported_with_category() {
        let registry = HandlerRegistry::builder().register(Broken).build();

        let err = registry
            .classify(&ServiceError::invalid_state("account is closed"))
            .unwrap_err();
        assert_eq!(err.category, ErrorCategory::InvalidState);
        assert!(err.to_string().contains("template missing"));
    }

    #[test]
    fn registered_lists_sorted_categories() {
        assert_eq!(
            HandlerRegistry::with_defaults().registered(),
            vec![
                ErrorCategory::MissingRequiredInput,
                ErrorCategory::InvalidInput,
                ErrorCategory::InvalidState,
                ErrorCategory::NotFound,
            ]
        );
    }
}
