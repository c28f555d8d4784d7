//! [`SqliteRegistry`] — the SQLite implementation of [`NameRegistry`].

use std::path::Path;

use signup_core::{DateKey, DateNames, NameRegistry};

use crate::{Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A name registry backed by a single SQLite file.
///
/// All statements run on the one connection thread owned by
/// [`tokio_rusqlite::Connection`], so each `call` closure is an exclusive
/// critical section. Every registry operation is exactly one closure.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteRegistry {
  conn: tokio_rusqlite::Connection,
}

impl SqliteRegistry {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Insert a row verbatim, bypassing key validation.
  #[cfg(test)]
  pub(crate) async fn insert_raw(&self, date: Option<&str>, name: Option<&str>) -> Result<()> {
    let date = date.map(str::to_owned);
    let name = name.map(str::to_owned);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO names (date, name) VALUES (?1, ?2)",
          rusqlite::params![date, name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `sql` with its date bounds and group the `(date, name)` rows it
  /// returns by date, keeping row order within each date.
  ///
  /// Rows written before dates were validated may hold a NULL or a
  /// non-normalized date; those are logged and skipped.
  async fn grouped(
    &self,
    sql: &'static str,
    lo: String,
    hi: Option<String>,
  ) -> Result<DateNames> {
    let rows: Vec<(Option<String>, Option<String>)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = match hi {
          Some(hi) => stmt
            .query_map(rusqlite::params![lo, hi], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<(Option<String>, Option<String>)>>>()?,
          None => stmt
            .query_map(rusqlite::params![lo], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<(Option<String>, Option<String>)>>>()?,
        };
        Ok(rows)
      })
      .await?;

    let mut grouped = DateNames::new();
    for (raw_date, name) in rows {
      let (Some(raw_date), Some(name)) = (raw_date, name) else {
        tracing::warn!("skipping row with NULL date or name");
        continue;
      };
      match raw_date.parse::<DateKey>() {
        Ok(date) => grouped.entry(date).or_default().push(name),
        Err(e) => tracing::warn!(date = %raw_date, %name, error = %e, "skipping unreadable row"),
      }
    }
    Ok(grouped)
  }
}

// ─── NameRegistry impl ───────────────────────────────────────────────────────

impl NameRegistry for SqliteRegistry {
  type Error = crate::Error;

  async fn add(&self, date: DateKey, name: String) -> Result<bool> {
    let date_str = date.to_string();

    let inserted = self
      .conn
      .call(move |conn| {
        // Duplicate check and insert in one statement.
        let changed = conn.execute(
          "INSERT INTO names (date, name)
           SELECT ?1, ?2
           WHERE NOT EXISTS (SELECT 1 FROM names WHERE date = ?1 AND name = ?2)",
          rusqlite::params![date_str, name],
        )?;
        Ok(changed > 0)
      })
      .await?;

    Ok(inserted)
  }

  async fn remove(&self, date: DateKey, name: String) -> Result<bool> {
    let date_str = date.to_string();

    let removed = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "DELETE FROM names WHERE id = (
             SELECT id FROM names WHERE date = ?1 AND name = ?2
             ORDER BY id LIMIT 1
           )",
          rusqlite::params![date_str, name],
        )?;
        Ok(changed > 0)
      })
      .await?;

    Ok(removed)
  }

  async fn list(&self, date: DateKey) -> Result<Vec<String>> {
    let date_str = date.to_string();

    let names = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT name FROM names WHERE date = ?1 ORDER BY id")?;
        let names = stmt
          .query_map(rusqlite::params![date_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<Option<String>>>>()?;
        Ok(names.into_iter().flatten().collect::<Vec<String>>())
      })
      .await?;

    Ok(names)
  }

  async fn list_between(&self, first: DateKey, last: DateKey) -> Result<DateNames> {
    // Zero-padded keys compare correctly as text.
    self
      .grouped(
        "SELECT date, name FROM names
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date, id",
        first.to_string(),
        Some(last.to_string()),
      )
      .await
  }

  async fn snapshot(&self, since: DateKey) -> Result<DateNames> {
    self
      .grouped(
        "SELECT date, name FROM names WHERE date > ?1 ORDER BY date, id",
        since.to_string(),
        None,
      )
      .await
  }
}
