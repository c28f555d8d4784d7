//! Error types for `signup-core`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("invalid date {0:?}: expected YYYY-MM-DD")]
  InvalidDate(String),

  #[error("invalid month {0}: expected 1-12")]
  InvalidMonth(u32),

  #[error("invalid year {0}: expected 1-9999")]
  InvalidYear(i32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
