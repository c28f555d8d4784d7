//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{FormRejection, JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by a handler.
///
/// Client errors never touch the registry; store errors fail only the
/// request that hit them.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store error");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

impl From<signup_core::Error> for ApiError {
  fn from(e: signup_core::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<FormRejection> for ApiError {
  fn from(r: FormRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}
