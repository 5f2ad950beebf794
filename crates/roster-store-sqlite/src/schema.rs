//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL. Every statement is safe to re-run.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS persons (
    id             TEXT PRIMARY KEY,
    name           TEXT NOT NULL,
    favorite_food  TEXT NOT NULL,
    favorite_movie TEXT NOT NULL,
    status         TEXT NOT NULL DEFAULT 'Active'
                   CHECK (status IN ('Active', 'Inactive')),
    created_at     TEXT NOT NULL,   -- RFC 3339 UTC, fixed width
    updated_at     TEXT NOT NULL,
    UNIQUE (name)
);

CREATE INDEX IF NOT EXISTS persons_status_idx ON persons(status);

PRAGMA user_version = 1;
";
