//! The `ProfileStore` trait.
//!
//! Implemented by storage backends (e.g. `indica-store-sqlite`). Higher layers
//! (`indica-api`, `indica-server`) depend on this abstraction, not on any
//! concrete backend. The trait is read-only: profiles are written by whatever
//! owns the backing store.

use std::future::Future;

use uuid::Uuid;

use crate::profile::{ConsultantProfile, ReferredProfile};

/// Read access to the profile table.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch a profile by id as a consultant. Returns `None` if not found;
  /// the role is not checked here.
  fn get_consultant(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ConsultantProfile>, Self::Error>> + Send + '_;

  /// Fetch the profile that owns `referral_code`, if any.
  fn find_by_referral_code<'a>(
    &'a self,
    referral_code: &'a str,
  ) -> impl Future<Output = Result<Option<ConsultantProfile>, Self::Error>> + Send + 'a;

  /// Every profile whose `referred_by` is `consultant_id`, ordered by
  /// display name (see [`sort_by_display_name`](crate::profile::sort_by_display_name)).
  ///
  /// The result is one consistent snapshot; callers compute summaries and
  /// per-row values from the same vector.
  fn list_referrals(
    &self,
    consultant_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ReferredProfile>, Self::Error>> + Send + '_;
}
