//! Last-resort conversion of a raised [`ServiceError`] into a written
//! problem-details response.
//!
//! [`GlobalErrorHandler::try_handle`] is the only place where classification,
//! request enrichment and the transport write meet. It never propagates a
//! failure: if the error cannot be classified or the write does not complete,
//! it returns `false` and the transport answers with its own default.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use finance_errors::{
    APPLICATION_PROBLEM_JSON, ClassifyError, ErrorCategory, HandlerRegistry, ServiceError,
};
use http::StatusCode;
use tokio_util::sync::CancellationToken;

/// Per-request data the boundary needs from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Request path, copied into `Problem::instance`.
    pub path: String,
    /// Correlation id, copied into the `TraceId` extension.
    pub trace_id: String,
}

impl RequestContext {
    pub fn new(path: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            trace_id: trace_id.into(),
        }
    }
}

/// Destination of the serialized problem.
#[async_trait]
pub trait ProblemSink: Send {
    /// Writes the full response.
    ///
    /// # Errors
    /// Returns an I/O error when the response could not be written.
    async fn write(
        &mut self,
        status: StatusCode,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> std::io::Result<()>;
}

#[derive(Debug, thiserror::Error)]
enum Unhandleable {
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error("problem handler panicked: {0}")]
    Panicked(String),
}

/// Boundary adapter between the handler registry and the transport.
#[derive(Debug, Clone)]
pub struct GlobalErrorHandler {
    registry: HandlerRegistry,
}

impl GlobalErrorHandler {
    #[must_use]
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Classifies `error`, enriches the problem with `ctx` and writes it.
    ///
    /// Returns `true` once the response is written. Returns `false` without
    /// writing when classification fails or panics, and `false` when `cancel`
    /// fires or the write fails.
    pub async fn try_handle(
        &self,
        ctx: &RequestContext,
        error: &ServiceError,
        sink: &mut dyn ProblemSink,
        cancel: &CancellationToken,
    ) -> bool {
        let category = error.category();
        let mut problem = match self.classify(error) {
            Ok(problem) => problem,
            Err(failure) => {
                tracing::error!(
                    severity = "fatal",
                    %category,
                    path = %ctx.path,
                    trace_id = %ctx.trace_id,
                    failure = %failure,
                    "Failed to classify error: {error}"
                );
                return false;
            }
        };

        let status = problem.status;
        log_outcome(category, error, status);

        problem.instance.clone_from(&ctx.path);
        problem.attach_trace_id(ctx.trace_id.as_str());

        let body = match serde_json::to_vec(&problem) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(%category, error = %e, "Failed to serialize problem");
                return false;
            }
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!(path = %ctx.path, "Request cancelled before problem was written");
                false
            }
            written = sink.write(status, APPLICATION_PROBLEM_JSON, body) => match written {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!(%category, path = %ctx.path, error = %e, "Failed to write problem response");
                    false
                }
            }
        }
    }

    fn classify(&self, error: &ServiceError) -> Result<finance_errors::Problem, Unhandleable> {
        match std::panic::catch_unwind(AssertUnwindSafe(|| self.registry.classify(error))) {
            Ok(result) => Ok(result?),
            Err(payload) => Err(Unhandleable::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

impl Default for GlobalErrorHandler {
    fn default() -> Self {
        Self::new(HandlerRegistry::with_defaults())
    }
}

fn log_outcome(category: ErrorCategory, error: &ServiceError, status: StatusCode) {
    let code = status.as_u16();
    if status.is_server_error() {
        tracing::error!(%category, status = code, "Request failed: {error}");
    } else if status.is_client_error() {
        tracing::warn!(%category, status = code, "Request rejected: {error}");
    } else {
        tracing::info!(%category, status = code, "Request completed with problem: {error}");
    }
}

/// Best-effort text of a panic payload.
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
