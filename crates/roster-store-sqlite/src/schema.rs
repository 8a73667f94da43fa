//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    line_user_id      TEXT UNIQUE NOT NULL,
    display_name      TEXT,
    picture_url       TEXT,
    faculty           TEXT,            -- segment display name, NULL until chosen
    registered_at     TEXT NOT NULL,   -- RFC 3339 UTC; set once
    last_interaction  TEXT NOT NULL    -- RFC 3339 UTC; bumped on every contact
);

CREATE INDEX IF NOT EXISTS idx_line_user_id ON users(line_user_id);
CREATE INDEX IF NOT EXISTS idx_faculty      ON users(faculty);

PRAGMA user_version = 1;
";
