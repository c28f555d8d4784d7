//! SQL schema for the sign-up store.
//!
//! Executed once at connection startup. The `names` table layout predates
//! this crate, so existing database files open unchanged. Old rows whose
//! date is not a valid `YYYY-MM-DD` key are skipped on read.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS names (
    \"id\"   INTEGER PRIMARY KEY AUTOINCREMENT,
    \"date\" TEXT,    -- YYYY-MM-DD
    \"name\" TEXT
);

CREATE INDEX IF NOT EXISTS names_date_idx ON names(date);
";
