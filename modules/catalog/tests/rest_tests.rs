#![allow(clippy::unwrap_used, clippy::expect_used)]

//! REST tests for the catalog behind the full problem-details stack

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use catalog::infra::memory_repo::InMemoryCatalogRepository;
use catalog::{CatalogConfig, CatalogModule};
use finance_errors::HandlerRegistry;
use finance_kit::api::{BoundaryState, GlobalErrorHandler, apply_middleware_stack};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let module = CatalogModule::new(
        CatalogConfig::default(),
        Arc::new(InMemoryCatalogRepository::new()),
    );
    let state = BoundaryState::new(GlobalErrorHandler::new(HandlerRegistry::with_defaults()));
    apply_middleware_stack(module.router(), state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn is_problem(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|v| v == "application/problem+json")
}

#[tokio::test]
async fn currency_crud_roundtrip() {
    let app = app();

    let created = send(
        &app,
        "POST",
        "/api/v1/currencies",
        Some(json!({"code": "EUR", "name": "Euro", "symbol": "€"})),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(
        created.headers().get(header::LOCATION).unwrap(),
        "/api/v1/currencies/EUR"
    );

    let fetched = send(&app, "GET", "/api/v1/currencies/EUR", None).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(
        json_body(fetched).await,
        json!({"code": "EUR", "name": "Euro", "symbol": "€"})
    );

    let updated = send(
        &app,
        "PUT",
        "/api/v1/currencies/EUR",
        Some(json!({"name": "Euro (EU)"})),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(json_body(updated).await["name"], "Euro (EU)");

    let listed = send(&app, "GET", "/api/v1/currencies", None).await;
    assert_eq!(json_body(listed).await.as_array().unwrap().len(), 1);

    let deleted = send(&app, "DELETE", "/api/v1/currencies/EUR", None).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = send(&app, "GET", "/api/v1/currencies/EUR", None).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_code_is_a_400_problem() {
    let app = app();

    let response = send(
        &app,
        "POST",
        "/api/v1/currencies",
        Some(json!({"name": "Euro"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(is_problem(&response));
    let body = json_body(response).await;
    assert_eq!(body["title"], "Некорректные параметры запроса");
    assert_eq!(body["detail"], "code is required");
    assert_eq!(body["instance"], "/api/v1/currencies");
    assert!(body["extensions"]["TraceId"].is_string());
}

#[tokio::test]
async fn blank_name_is_missing_on_create_and_update() {
    let app = app();

    let created = send(
        &app,
        "POST",
        "/api/v1/currencies",
        Some(json!({"code": "CHF", "name": "  "})),
    )
    .await;
    assert_eq!(created.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(created).await["detail"], "name is required");

    let valid = send(
        &app,
        "POST",
        "/api/v1/currencies",
        Some(json!({"code": "CHF", "name": "Swiss franc"})),
    )
    .await;
    assert_eq!(valid.status(), StatusCode::CREATED);

    let updated = send(
        &app,
        "PUT",
        "/api/v1/currencies/CHF",
        Some(json!({"name": "  "})),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::BAD_REQUEST);
    assert!(is_problem(&updated));
    assert_eq!(json_body(updated).await["detail"], "name is required");
}

#[tokio::test]
async fn malformed_body_is_a_400_problem() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/currencies")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(is_problem(&response));
}

#[tokio::test]
async fn duplicate_currency_is_a_409_problem() {
    let app = app();
    let usd = json!({"code": "USD", "name": "US Dollar"});

    let first = send(&app, "POST", "/api/v1/currencies", Some(usd.clone())).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = send(&app, "POST", "/api/v1/currencies", Some(usd)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = json_body(second).await;
    assert_eq!(body["title"], "Конфликт состояния ресурса");
    assert_eq!(body["detail"], "currency USD already exists");
}

#[tokio::test]
async fn unknown_currency_is_a_404_problem() {
    let app = app();

    let response = send(&app, "GET", "/api/v1/currencies/JPY", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(is_problem(&response));
    let body = json_body(response).await;
    assert_eq!(body["title"], "Ресурс не найден");
    assert_eq!(body["detail"], "currency JPY not found");
    assert_eq!(body["instance"], "/api/v1/currencies/JPY");
}

#[tokio::test]
async fn lower_case_code_is_invalid_input() {
    let app = app();

    let response = send(&app, "GET", "/api/v1/currencies/usd", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["detail"].as_str().unwrap().contains("'usd'"));
}

#[tokio::test]
async fn account_types_create_and_fetch() {
    let app = app();

    let created = send(
        &app,
        "POST",
        "/api/v1/account-types",
        Some(json!({"code": "credit_card", "name": "Credit card"})),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(
        created.headers().get(header::LOCATION).unwrap(),
        "/api/v1/account-types/credit_card"
    );

    let fetched = send(&app, "GET", "/api/v1/account-types/credit_card", None).await;
    assert_eq!(
        json_body(fetched).await,
        json!({"code": "credit_card", "name": "Credit card"})
    );

    let listed = send(&app, "GET", "/api/v1/account-types", None).await;
    assert_eq!(json_body(listed).await.as_array().unwrap().len(), 1);

    let missing_name = send(
        &app,
        "POST",
        "/api/v1/account-types",
        Some(json!({"code": "cash"})),
    )
    .await;
    assert_eq!(missing_name.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(missing_name).await["detail"], "name is required");
}

#[tokio::test]
async fn seeded_entries_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("currencies.json"),
        r#"[{"code": "RUB", "name": "Russian ruble", "symbol": "₽"}]"#,
    )
    .unwrap();
    let module = CatalogModule::new(
        CatalogConfig {
            seed_dir: Some(dir.path().to_path_buf()),
            ..CatalogConfig::default()
        },
        Arc::new(InMemoryCatalogRepository::new()),
    );
    module.seed().await.unwrap();
    let app = apply_middleware_stack(
        module.router(),
        BoundaryState::new(GlobalErrorHandler::default()),
    );

    let response = send(&app, "GET", "/api/v1/currencies/RUB", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["symbol"], "₽");
}
