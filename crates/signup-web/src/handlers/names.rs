//! Handlers for sign-up endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/submit-name` | Form: `date=YYYY-MM-DD&name=...` |
//! | `POST` | `/remove-name` | Body: `{"date":"YYYY-MM-DD","name":"..."}` |
//! | `GET`  | `/names`       | `?date=YYYY-MM-DD` |

use axum::{
  Form, Json,
  extract::{
    Query, State,
    rejection::{FormRejection, JsonRejection, QueryRejection},
  },
};
use serde::{Deserialize, Serialize};
use signup_core::{DateKey, NameRegistry};

use crate::{
  AppState,
  error::ApiError,
  handlers::{Success, log_state},
};

/// A (date, name) pair, accepted as a form or as JSON.
#[derive(Debug, Deserialize)]
pub struct NameBody {
  pub date: DateKey,
  pub name: String,
}

impl NameBody {
  /// Reject blank names. The name itself is stored exactly as given.
  fn validated(self) -> Result<Self, ApiError> {
    if self.name.trim().is_empty() {
      return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }
    Ok(self)
  }
}

// ─── Submit ───────────────────────────────────────────────────────────────────

/// `POST /submit-name` — signing up twice is a successful no-op.
pub async fn submit<R>(
  State(state): State<AppState<R>>,
  form: Result<Form<NameBody>, FormRejection>,
) -> Result<Json<Success>, ApiError>
where
  R: NameRegistry + Clone + 'static,
{
  let Form(body) = form?;
  let NameBody { date, name } = body.validated()?;

  let added = state
    .registry
    .add(date, name.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if added {
    tracing::info!(%date, %name, "added name");
  } else {
    tracing::info!(%date, %name, "name already signed up, not added");
  }

  log_state(state.registry.as_ref()).await;
  Ok(Json(Success::OK))
}

// ─── Remove ───────────────────────────────────────────────────────────────────

/// `POST /remove-name` — removing an absent name is a successful no-op.
pub async fn remove<R>(
  State(state): State<AppState<R>>,
  body: Result<Json<NameBody>, JsonRejection>,
) -> Result<Json<Success>, ApiError>
where
  R: NameRegistry + Clone + 'static,
{
  let Json(body) = body?;
  let NameBody { date, name } = body.validated()?;

  let removed = state
    .registry
    .remove(date, name.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if removed {
    tracing::info!(%date, %name, "removed name");
  } else {
    tracing::info!(%date, %name, "name not signed up, nothing removed");
  }

  log_state(state.registry.as_ref()).await;
  Ok(Json(Success::OK))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub date: DateKey,
}

#[derive(Debug, Serialize)]
pub struct NamesResponse {
  pub names: Vec<String>,
}

/// `GET /names?date=<YYYY-MM-DD>`
pub async fn list<R>(
  State(state): State<AppState<R>>,
  query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<NamesResponse>, ApiError>
where
  R: NameRegistry + Clone + 'static,
{
  let Query(params) = query?;
  let names = state
    .registry
    .list(params.date)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(NamesResponse { names }))
}
