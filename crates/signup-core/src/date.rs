//! [`DateKey`] — the registry's lookup key.
//!
//! A date key is always a valid Gregorian date whose textual form is the
//! zero-padded `YYYY-MM-DD`. Only that exact form is accepted when parsing;
//! `2024-3-5` and friends are rejected rather than guessed at.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Smallest year a [`DateKey`] can carry.
pub const MIN_YEAR: i32 = 1;
/// Largest year a [`DateKey`] can carry. Keeps the year at four digits.
pub const MAX_YEAR: i32 = 9999;

/// A calendar date normalized to `YYYY-MM-DD`.
///
/// Ordering is chronological, which matches the lexicographic ordering of
/// the string form.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
  /// Build a key from its components.
  pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
      .ok_or_else(|| Error::InvalidDate(format!("{year}-{month}-{day}")))?;
    Self::from_naive(date)
  }

  /// Wrap a [`NaiveDate`], rejecting years that do not fit in four digits.
  pub fn from_naive(date: NaiveDate) -> Result<Self> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
      return Err(Error::InvalidYear(date.year()));
    }
    Ok(Self(date))
  }

  /// Today's date on the local clock.
  pub fn today() -> Self { Self(Local::now().date_naive()) }

  /// The previous calendar day, if it is still representable.
  pub fn pred(self) -> Option<Self> {
    self.0.pred_opt().and_then(|d| Self::from_naive(d).ok())
  }

  pub fn naive(self) -> NaiveDate { self.0 }

  pub fn year(self) -> i32 { self.0.year() }

  pub fn month(self) -> u32 { self.0.month() }

  pub fn day(self) -> u32 { self.0.day() }
}

impl fmt::Display for DateKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format("%Y-%m-%d"))
  }
}

impl FromStr for DateKey {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    // chrono's `%m`/`%d` accept a single digit, so check the shape first.
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 10
      && bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
      });
    if !well_formed {
      return Err(Error::InvalidDate(s.to_owned()));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
      .map_err(|_| Error::InvalidDate(s.to_owned()))?;
    Self::from_naive(date).map_err(|_| Error::InvalidDate(s.to_owned()))
  }
}

impl TryFrom<String> for DateKey {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl From<DateKey> for String {
  fn from(key: DateKey) -> Self { key.to_string() }
}
