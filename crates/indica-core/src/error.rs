//! Error types for `indica-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("consultant not found: {0}")]
  ConsultantNotFound(Uuid),

  #[error("profile {0} is not a consultant")]
  NotConsultant(Uuid),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
