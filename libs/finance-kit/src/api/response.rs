//! Success responders for REST handlers.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 201 Created with a JSON body and a `Location` of `<collection>/<id>`.
#[derive(Debug)]
pub struct Created<T> {
    location: String,
    body: T,
}

impl<T> Created<T> {
    /// `collection` is the URI the create request was posted to.
    #[must_use]
    pub fn under(collection: &Uri, id: &str, body: T) -> Self {
        let base = collection.path().trim_end_matches('/');
        Self {
            location: format!("{base}/{id}"),
            body,
        }
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut resp = (StatusCode::CREATED, Json(self.body)).into_response();
        match HeaderValue::try_from(self.location) {
            Ok(location) => {
                resp.headers_mut().insert(header::LOCATION, location);
            }
            Err(e) => tracing::warn!(error = %e, "Dropping invalid Location header"),
        }
        resp
    }
}
