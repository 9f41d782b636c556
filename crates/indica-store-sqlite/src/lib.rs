//! SQLite backend for the Indica profile store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod record;

pub use error::{Error, Result};
pub use record::ProfileRecord;
pub use store::SqliteStore;
