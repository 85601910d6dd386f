//! SQL schema for the duel SQLite store.
//!
//! Executed once at connection startup. There is a single schema version,
//! recorded in `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- item_id is the rowid alias, so ids follow insertion order.
CREATE TABLE IF NOT EXISTS items (
    item_id           INTEGER PRIMARY KEY,
    text              TEXT    NOT NULL,
    score             INTEGER NOT NULL DEFAULT 0,
    comparison_count  INTEGER NOT NULL DEFAULT 0,
    CHECK (score >= 0),
    CHECK (score <= comparison_count)
);

-- Snapshots are written once and never updated.
CREATE TABLE IF NOT EXISTS snapshots (
    snapshot_id  INTEGER PRIMARY KEY,
    content      TEXT NOT NULL,
    created_at   TEXT NOT NULL   -- RFC 3339 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS items_comparison_idx ON items(comparison_count);

PRAGMA user_version = 1;
";
