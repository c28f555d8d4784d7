//! [`MemoryRegistry`] — an in-process [`NameRegistry`].
//!
//! All state lives in one `BTreeMap` behind one mutex. Every operation takes
//! the lock for its whole duration and releases it on return. Nothing is
//! durable; state is lost when the process exits.

use std::{
  convert::Infallible,
  ops::Bound,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{DateKey, registry::{DateNames, NameRegistry}};

/// In-memory name registry.
///
/// Cloning is cheap; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
  dates: Arc<Mutex<DateNames>>,
}

impl MemoryRegistry {
  pub fn new() -> Self { Self::default() }

  fn lock(&self) -> MutexGuard<'_, DateNames> {
    // Every mutation is a single push or remove, so a panicking holder
    // cannot leave a list half-written.
    self.dates.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl NameRegistry for MemoryRegistry {
  type Error = Infallible;

  async fn add(&self, date: DateKey, name: String) -> Result<bool, Infallible> {
    let mut dates = self.lock();
    let names = dates.entry(date).or_default();
    if names.contains(&name) {
      return Ok(false);
    }
    names.push(name);
    Ok(true)
  }

  async fn remove(&self, date: DateKey, name: String) -> Result<bool, Infallible> {
    let mut dates = self.lock();
    let Some(names) = dates.get_mut(&date) else {
      return Ok(false);
    };
    let Some(pos) = names.iter().position(|n| *n == name) else {
      return Ok(false);
    };
    names.remove(pos);
    if names.is_empty() {
      dates.remove(&date);
    }
    Ok(true)
  }

  async fn list(&self, date: DateKey) -> Result<Vec<String>, Infallible> {
    Ok(self.lock().get(&date).cloned().unwrap_or_default())
  }

  async fn list_between(
    &self,
    first: DateKey,
    last: DateKey,
  ) -> Result<DateNames, Infallible> {
    if first > last {
      return Ok(DateNames::new());
    }
    Ok(
      self
        .lock()
        .range(first..=last)
        .map(|(date, names)| (*date, names.clone()))
        .collect(),
    )
  }

  async fn snapshot(&self, since: DateKey) -> Result<DateNames, Infallible> {
    Ok(
      self
        .lock()
        .range((Bound::Excluded(since), Bound::Unbounded))
        .map(|(date, names)| (*date, names.clone()))
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(s: &str) -> DateKey { s.parse().unwrap() }

  #[tokio::test]
  async fn duplicate_add_is_a_no_op() {
    let r = MemoryRegistry::new();
    let d = key("2024-05-01");

    assert!(r.add(d, "Alice".into()).await.unwrap());
    assert!(!r.add(d, "Alice".into()).await.unwrap());
    assert_eq!(r.list(d).await.unwrap(), vec!["Alice"]);
  }

  #[tokio::test]
  async fn names_are_case_sensitive() {
    let r = MemoryRegistry::new();
    let d = key("2024-05-01");

    r.add(d, "alice".into()).await.unwrap();
    assert!(r.add(d, "Alice".into()).await.unwrap());
    assert_eq!(r.list(d).await.unwrap(), vec!["alice", "Alice"]);
  }

  #[tokio::test]
  async fn remove_preserves_order_of_survivors() {
    let r = MemoryRegistry::new();
    let d = key("2024-05-01");

    r.add(d, "Alice".into()).await.unwrap();
    r.add(d, "Bob".into()).await.unwrap();
    r.add(d, "Carol".into()).await.unwrap();
    assert!(r.remove(d, "Alice".into()).await.unwrap());
    assert_eq!(r.list(d).await.unwrap(), vec!["Bob", "Carol"]);
  }

  #[tokio::test]
  async fn remove_missing_returns_false() {
    let r = MemoryRegistry::new();
    let d = key("2024-05-01");

    assert!(!r.remove(d, "Nobody".into()).await.unwrap());
    r.add(d, "Alice".into()).await.unwrap();
    assert!(!r.remove(d, "Nobody".into()).await.unwrap());
    assert_eq!(r.list(d).await.unwrap(), vec!["Alice"]);
  }

  #[tokio::test]
  async fn list_unknown_date_is_empty() {
    let r = MemoryRegistry::new();
    assert!(r.list(key("2030-01-01")).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn dates_are_independent() {
    let r = MemoryRegistry::new();
    r.add(key("2024-05-01"), "Alice".into()).await.unwrap();
    assert!(r.add(key("2024-05-02"), "Alice".into()).await.unwrap());
    assert!(r.remove(key("2024-05-01"), "Alice".into()).await.unwrap());
    assert_eq!(r.list(key("2024-05-02")).await.unwrap(), vec!["Alice"]);
  }

  #[tokio::test]
  async fn list_between_is_inclusive() {
    let r = MemoryRegistry::new();
    r.add(key("2024-04-30"), "Before".into()).await.unwrap();
    r.add(key("2024-05-01"), "First".into()).await.unwrap();
    r.add(key("2024-05-31"), "Last".into()).await.unwrap();
    r.add(key("2024-06-01"), "After".into()).await.unwrap();

    let month = r
      .list_between(key("2024-05-01"), key("2024-05-31"))
      .await
      .unwrap();
    assert_eq!(month.len(), 2);
    assert_eq!(month[&key("2024-05-01")], vec!["First"]);
    assert_eq!(month[&key("2024-05-31")], vec!["Last"]);

    let backwards = r
      .list_between(key("2024-05-31"), key("2024-05-01"))
      .await
      .unwrap();
    assert!(backwards.is_empty());
  }

  #[tokio::test]
  async fn snapshot_excludes_cutoff_and_emptied_dates() {
    let r = MemoryRegistry::new();
    r.add(key("2024-05-01"), "Old".into()).await.unwrap();
    r.add(key("2024-05-02"), "Kept".into()).await.unwrap();
    r.add(key("2024-05-03"), "Gone".into()).await.unwrap();
    r.remove(key("2024-05-03"), "Gone".into()).await.unwrap();

    let snap = r.snapshot(key("2024-05-01")).await.unwrap();
    assert_eq!(snap.keys().copied().collect::<Vec<_>>(), vec![key("2024-05-02")]);
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn concurrent_adds_lose_nothing() {
    let r = MemoryRegistry::new();
    let d = key("2024-05-01");

    let tasks: Vec<_> = (0..64)
      .map(|i| {
        let r = r.clone();
        tokio::spawn(async move { r.add(d, format!("user-{i}")).await.unwrap() })
      })
      .collect();
    for task in tasks {
      assert!(task.await.unwrap());
    }

    let names = r.list(d).await.unwrap();
    assert_eq!(names.len(), 64);
    for i in 0..64 {
      assert!(names.contains(&format!("user-{i}")));
    }
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn concurrent_duplicate_adds_insert_once() {
    let r = MemoryRegistry::new();
    let d = key("2024-05-01");

    let tasks: Vec<_> = (0..32)
      .map(|_| {
        let r = r.clone();
        tokio::spawn(async move { r.add(d, "Alice".into()).await.unwrap() })
      })
      .collect();
    let mut inserted = 0;
    for task in tasks {
      if task.await.unwrap() {
        inserted += 1;
      }
    }

    assert_eq!(inserted, 1);
    assert_eq!(r.list(d).await.unwrap(), vec!["Alice"]);
  }
}
