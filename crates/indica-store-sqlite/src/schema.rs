//! SQL schema for the Indica SQLite store.
//!
//! Mirrors the columns of the remote `profiles` table that the dashboard
//! reads. Executed once at connection startup.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS profiles (
    id              TEXT PRIMARY KEY,
    role            TEXT NOT NULL,   -- 'consultor' | 'cliente' | ...
    name            TEXT,
    phone           TEXT,
    referral_code   TEXT UNIQUE,
    referred_by     TEXT REFERENCES profiles(id),
    current_balance REAL,            -- NULL reads as zero
    contract_status TEXT,            -- raw value, e.g. 'ativo'
    created_at      TEXT NOT NULL    -- ISO 8601 UTC
);

CREATE INDEX IF NOT EXISTS profiles_referred_by_idx ON profiles(referred_by);

PRAGMA user_version = 1;
";
