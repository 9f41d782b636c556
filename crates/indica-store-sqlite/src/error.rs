//! Error type for `indica-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A referred profile points at a consultant that is not in the store.
  #[error("referring profile not found: {0}")]
  ReferrerNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
