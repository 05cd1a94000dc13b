use axum::{Router, middleware::from_fn_with_state};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::field::Empty;

use super::error_layer::{
    BoundaryState, panic_response, problem_boundary_middleware, route_not_found,
};
use super::request_id::{self, MakeReqId};

/// Apply all middleware layers to a router.
///
/// Layers are added innermost first. At runtime requests flow
/// `SetRequestId` → `PropagateRequestId` → Trace → `ProblemBoundary` →
/// `CatchPanic` → Router, so the boundary sees the request id and every
/// handler error, panic or unknown route.
pub fn apply_middleware_stack(mut router: Router, state: BoundaryState) -> Router {
    let x_request_id = request_id::header();

    router = router
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn_with_state(state, problem_boundary_middleware));

    router = apply_trace_layer(router);

    router
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeReqId))
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(request_id::header())
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: std::time::Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                },
            ),
    )
}
