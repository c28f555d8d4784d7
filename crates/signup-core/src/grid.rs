//! Month-grid construction.
//!
//! A [`MonthGrid`] is always 42 cells (six weeks of seven days, Sunday
//! first), regardless of how many weeks the month actually spans. Cells
//! before day 1 and after the last day are blank.

use chrono::{Datelike, Local, Month, Months};

use crate::{
  DateKey, Error, Result,
  date::{MAX_YEAR, MIN_YEAR},
};

/// Number of cells in every month grid.
pub const GRID_CELLS: usize = 42;

/// Days per grid row.
pub const WEEK_LEN: usize = 7;

// ─── MonthRef ────────────────────────────────────────────────────────────────

/// A (year, month) pair.
///
/// [`MonthRef::new`] validates both parts. [`prev`](Self::prev) and
/// [`next`](Self::next) only roll the month over, so at the very edges of
/// the supported range they can produce a year that `new` would reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRef {
  year:  i32,
  month: u32,
}

impl MonthRef {
  pub fn new(year: i32, month: u32) -> Result<Self> {
    if !(1..=12).contains(&month) {
      return Err(Error::InvalidMonth(month));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
      return Err(Error::InvalidYear(year));
    }
    Ok(Self { year, month })
  }

  /// The month containing today's date on the local clock.
  pub fn current() -> Self {
    let today = Local::now().date_naive();
    Self { year: today.year(), month: today.month() }
  }

  pub fn year(self) -> i32 { self.year }

  pub fn month(self) -> u32 { self.month }

  pub fn prev(self) -> Self {
    if self.month == 1 {
      Self { year: self.year - 1, month: 12 }
    } else {
      Self { year: self.year, month: self.month - 1 }
    }
  }

  pub fn next(self) -> Self {
    if self.month == 12 {
      Self { year: self.year + 1, month: 1 }
    } else {
      Self { year: self.year, month: self.month + 1 }
    }
  }

  /// English month name, e.g. `"February"`.
  pub fn name(self) -> &'static str {
    u8::try_from(self.month)
      .ok()
      .and_then(|m| Month::try_from(m).ok())
      .map_or("", |m| m.name())
  }

  pub fn first_day(self) -> Result<DateKey> {
    DateKey::from_ymd(self.year, self.month, 1)
  }

  /// The last day of the month: one month after day 1, minus one day.
  pub fn last_day(self) -> Result<DateKey> {
    let first = self.first_day()?;
    let last = first
      .naive()
      .checked_add_months(Months::new(1))
      .and_then(|d| d.pred_opt())
      .ok_or(Error::InvalidYear(self.year))?;
    DateKey::from_naive(last)
  }

  pub fn days_in_month(self) -> Result<u32> {
    Ok(self.last_day()?.day())
  }
}

// ─── Grid ────────────────────────────────────────────────────────────────────

/// One cell of a [`MonthGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayCell {
  Blank,
  Day {
    day:   u32,
    date:  DateKey,
    names: Vec<String>,
  },
}

impl DayCell {
  pub fn is_blank(&self) -> bool { matches!(self, Self::Blank) }

  pub fn count(&self) -> usize {
    match self {
      Self::Blank => 0,
      Self::Day { names, .. } => names.len(),
    }
  }
}

/// The derived, read-only view of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
  pub at:    MonthRef,
  pub prev:  MonthRef,
  pub next:  MonthRef,
  pub cells: Vec<DayCell>,
}

impl MonthGrid {
  pub fn year(&self) -> i32 { self.at.year() }

  pub fn month(&self) -> u32 { self.at.month() }

  pub fn month_name(&self) -> &'static str { self.at.name() }

  /// The grid split into rows of seven cells.
  pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
    self.cells.chunks(WEEK_LEN)
  }
}

/// Build the 42-cell grid for `month` of `year`.
///
/// `lookup` supplies the names signed up for each day of the month. It is
/// called once per day, in order.
pub fn build_grid<F>(year: i32, month: u32, mut lookup: F) -> Result<MonthGrid>
where
  F: FnMut(&DateKey) -> Vec<String>,
{
  let at = MonthRef::new(year, month)?;
  let first = at.first_day()?;
  let leading = first.naive().weekday().num_days_from_sunday() as usize;
  let days_in_month = at.days_in_month()?;

  let mut cells = Vec::with_capacity(GRID_CELLS);
  cells.resize(leading, DayCell::Blank);

  for day in 1..=days_in_month {
    let date = DateKey::from_ymd(year, month, day)?;
    let names = lookup(&date);
    cells.push(DayCell::Day { day, date, names });
  }

  cells.resize(GRID_CELLS, DayCell::Blank);

  Ok(MonthGrid { at, prev: at.prev(), next: at.next(), cells })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn empty(year: i32, month: u32) -> MonthGrid {
    build_grid(year, month, |_| Vec::new()).unwrap()
  }

  fn leading_blanks(grid: &MonthGrid) -> usize {
    grid.cells.iter().take_while(|c| c.is_blank()).count()
  }

  fn day_cells(grid: &MonthGrid) -> usize {
    grid.cells.iter().filter(|c| !c.is_blank()).count()
  }

  #[test]
  fn every_month_has_42_cells() {
    for year in [1, 1900, 2000, 2023, 2024, 9999] {
      for month in 1..=12 {
        assert_eq!(empty(year, month).cells.len(), GRID_CELLS, "{year}-{month}");
      }
    }
  }

  #[test]
  fn leading_blanks_match_weekday_of_first() {
    // 2024-09-01 is a Sunday, 2024-04-01 a Monday, 2024-02-01 a Thursday,
    // 2024-06-01 a Saturday.
    assert_eq!(leading_blanks(&empty(2024, 9)), 0);
    assert_eq!(leading_blanks(&empty(2024, 4)), 1);
    assert_eq!(leading_blanks(&empty(2024, 2)), 4);
    assert_eq!(leading_blanks(&empty(2024, 6)), 6);
  }

  #[test]
  fn day_cells_match_days_in_month() {
    assert_eq!(day_cells(&empty(2024, 2)), 29);
    assert_eq!(day_cells(&empty(2023, 2)), 28);
    assert_eq!(day_cells(&empty(1900, 2)), 28);
    assert_eq!(day_cells(&empty(2000, 2)), 29);
    assert_eq!(day_cells(&empty(2024, 4)), 30);
    assert_eq!(day_cells(&empty(2024, 12)), 31);
  }

  #[test]
  fn day_cells_are_consecutive_and_keyed() {
    let grid = empty(2024, 3);
    let days: Vec<_> = grid
      .cells
      .iter()
      .filter_map(|c| match c {
        DayCell::Day { day, date, .. } => Some((*day, date.to_string())),
        DayCell::Blank => None,
      })
      .collect();
    assert_eq!(days.first(), Some(&(1, "2024-03-01".to_string())));
    assert_eq!(days.last(), Some(&(31, "2024-03-31".to_string())));
    assert!(days.windows(2).all(|w| w[1].0 == w[0].0 + 1));
  }

  #[test]
  fn trailing_cells_are_blank() {
    // June 2024: 6 leading blanks + 30 days leaves 6 trailing blanks.
    let grid = empty(2024, 6);
    assert!(grid.cells[36..].iter().all(DayCell::is_blank));
    assert!(!grid.cells[35].is_blank());
  }

  #[test]
  fn lookup_fills_names_and_counts() {
    let grid = build_grid(2024, 5, |date| {
      if date.day() == 10 {
        vec!["Alice".into(), "Bob".into()]
      } else {
        Vec::new()
      }
    })
    .unwrap();

    let tenth = grid
      .cells
      .iter()
      .find(|c| matches!(c, DayCell::Day { day: 10, .. }))
      .unwrap();
    assert_eq!(tenth.count(), 2);
    assert_eq!(grid.cells.iter().map(DayCell::count).sum::<usize>(), 2);
  }

  #[test]
  fn navigation_rolls_over_year_boundaries() {
    let dec = empty(2024, 12);
    assert_eq!((dec.next.year(), dec.next.month()), (2025, 1));
    assert_eq!((dec.prev.year(), dec.prev.month()), (2024, 11));

    let jan = empty(2024, 1);
    assert_eq!((jan.prev.year(), jan.prev.month()), (2023, 12));
    assert_eq!((jan.next.year(), jan.next.month()), (2024, 2));
  }

  #[test]
  fn rejects_invalid_month_and_year() {
    assert_eq!(build_grid(2024, 0, |_| Vec::new()), Err(Error::InvalidMonth(0)));
    assert_eq!(build_grid(2024, 13, |_| Vec::new()), Err(Error::InvalidMonth(13)));
    assert_eq!(build_grid(0, 5, |_| Vec::new()), Err(Error::InvalidYear(0)));
  }

  #[test]
  fn weeks_are_six_rows_of_seven() {
    let grid = empty(2024, 2);
    let weeks: Vec<_> = grid.weeks().collect();
    assert_eq!(weeks.len(), 6);
    assert!(weeks.iter().all(|w| w.len() == WEEK_LEN));
  }

  #[test]
  fn month_names() {
    assert_eq!(MonthRef::new(2024, 2).unwrap().name(), "February");
    assert_eq!(empty(2024, 12).month_name(), "December");
  }
}
