//! Handler for the month view.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/`  | Optional `?month=1..12&year=YYYY`; each defaults to today's |
//!
//! An empty value (`?month=&year=`) is treated the same as a missing one.

use axum::{
  extract::{Query, State, rejection::QueryRejection},
  response::Html,
};
use serde::Deserialize;
use signup_core::{MonthRef, NameRegistry, build_grid};

use crate::{AppState, error::ApiError, view};

#[derive(Debug, Deserialize, Default)]
pub struct MonthParams {
  pub month: Option<String>,
  pub year:  Option<String>,
}

/// Parse an optional query value; blank counts as absent.
fn parse_param<T: std::str::FromStr>(
  key: &str,
  value: Option<&str>,
) -> Result<Option<T>, ApiError> {
  match value.map(str::trim).filter(|v| !v.is_empty()) {
    None => Ok(None),
    Some(v) => v
      .parse()
      .map(Some)
      .map_err(|_| ApiError::BadRequest(format!("invalid {key} {v:?}"))),
  }
}

/// `GET /[?month=<1-12>][&year=<year>]`
pub async fn index<R>(
  State(state): State<AppState<R>>,
  query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Html<String>, ApiError>
where
  R: NameRegistry + Clone + 'static,
{
  let Query(params) = query?;
  let current = MonthRef::current();
  let year: Option<i32> = parse_param("year", params.year.as_deref())?;
  let month: Option<u32> = parse_param("month", params.month.as_deref())?;
  let at = MonthRef::new(
    year.unwrap_or(current.year()),
    month.unwrap_or(current.month()),
  )?;

  let mut names = state
    .registry
    .list_between(at.first_day()?, at.last_day()?)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let grid = build_grid(at.year(), at.month(), |date| {
    names.remove(date).unwrap_or_default()
  })?;

  Ok(Html(view::month_page(&grid).into_string()))
}
