//! Axum glue for the problem-details boundary
//!
//! Handlers return `Result<_, ServiceError>`. A `ServiceError` turns into a
//! placeholder response that carries the error in its extensions; the
//! middleware here takes it back out and hands it to
//! [`GlobalErrorHandler::try_handle`] together with the request path and
//! request id.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use finance_errors::{RaisedError, ServiceError};
use tokio_util::sync::CancellationToken;

use super::boundary::{GlobalErrorHandler, ProblemSink, RequestContext, panic_message};
use super::request_id;

/// State shared by every invocation of [`problem_boundary_middleware`].
#[derive(Debug, Clone)]
pub struct BoundaryState {
    pub handler: Arc<GlobalErrorHandler>,
}

impl BoundaryState {
    #[must_use]
    pub fn new(handler: GlobalErrorHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

/// Sink that keeps the written problem as an axum response.
#[derive(Debug, Default)]
pub struct ResponseSlot {
    response: Option<Response>,
}

impl ResponseSlot {
    #[must_use]
    pub fn into_response(self) -> Option<Response> {
        self.response
    }
}

#[async_trait]
impl ProblemSink for ResponseSlot {
    async fn write(
        &mut self,
        status: StatusCode,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> std::io::Result<()> {
        let mut resp = Response::new(Body::from(body));
        *resp.status_mut() = status;
        resp.headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        self.response = Some(resp);
        Ok(())
    }
}

/// Converts a raised [`ServiceError`] into a problem-details response.
///
/// Responses without a raised error pass through untouched. When the
/// boundary cannot handle the error the client gets a bare 500.
///
/// Each request gets its own cancellation token, cancelled only when the
/// request future is dropped (the client went away). Server shutdown does not
/// touch it: requests still draining after shutdown get full problems.
pub async fn problem_boundary_middleware(
    State(state): State<BoundaryState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let trace_id = extract_trace_id(request.headers());

    let mut response = next.run(request).await;
    let Some(RaisedError(error)) = response.extensions_mut().remove::<RaisedError>() else {
        return response;
    };

    let ctx = RequestContext::new(path, trace_id);
    let cancel = CancellationToken::new();
    let _disconnect = cancel.clone().drop_guard();
    let mut slot = ResponseSlot::default();
    if state.handler.try_handle(&ctx, &error, &mut slot, &cancel).await {
        if let Some(resp) = slot.into_response() {
            return resp;
        }
    }

    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// Correlation id for the request: the request id header when present,
/// otherwise the current span id, otherwise a fresh UUID.
#[must_use]
pub fn extract_trace_id(headers: &HeaderMap) -> String {
    headers
        .get(request_id::header())
        .or_else(|| headers.get("x-trace-id"))
        .or_else(|| headers.get("traceparent"))
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
        .or_else(|| {
            tracing::Span::current()
                .id()
                .map(|id| id.into_u64().to_string())
        })
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Panic responder for `CatchPanicLayer`: raises the panic as an
/// unclassified error so the boundary answers it like any other.
#[must_use]
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic_message(payload.as_ref());
    tracing::error!(panic = %message, "Request handler panicked");
    ServiceError::internal(format!("handler panicked: {message}")).into_response()
}

/// Fallback route: unknown paths are reported as `NotFound`.
pub async fn route_not_found(uri: Uri) -> ServiceError {
    ServiceError::not_found(format!("no route for {}", uri.path()))
}
