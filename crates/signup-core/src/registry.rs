//! The `NameRegistry` trait.
//!
//! The trait is implemented by [`MemoryRegistry`](crate::MemoryRegistry) and
//! by storage backends (e.g. `signup-store-sqlite`). The web layer depends on
//! this abstraction, not on any concrete backend.

use std::{collections::BTreeMap, future::Future};

use crate::DateKey;

/// Names signed up per date, in sign-up order.
pub type DateNames = BTreeMap<DateKey, Vec<String>>;

/// The shared mapping from date to signed-up names.
///
/// Every method is one atomic operation: a read-then-write sequence such as
/// the duplicate check in [`add`](Self::add) never interleaves with another
/// call. Returned lists are copies, never views into live state.
pub trait NameRegistry: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append `name` to the list for `date` unless that exact (case-sensitive)
  /// name is already there. Returns whether an entry was inserted.
  fn add(
    &self,
    date: DateKey,
    name: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove the first entry for `date` equal to `name`. Returns `false` if
  /// there was none. The remaining entries keep their order.
  fn remove(
    &self,
    date: DateKey,
    name: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// The names signed up for `date`; empty if there are none.
  fn list(
    &self,
    date: DateKey,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Every date in `first..=last` that has at least one entry.
  ///
  /// Read in a single critical section, so a month view is consistent.
  fn list_between(
    &self,
    first: DateKey,
    last: DateKey,
  ) -> impl Future<Output = Result<DateNames, Self::Error>> + Send + '_;

  /// Every date strictly after `since` that has at least one entry.
  /// Used for diagnostic logging only.
  fn snapshot(
    &self,
    since: DateKey,
  ) -> impl Future<Output = Result<DateNames, Self::Error>> + Send + '_;
}
