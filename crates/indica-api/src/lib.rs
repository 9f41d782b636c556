//! JSON REST API for the Indica referral dashboard.
//!
//! Exposes an axum [`Router`] backed by any [`indica_core::store::ProfileStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility; the
//! consultant id is always an explicit path parameter.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", indica_api::api_router(store.clone(), base_url))
//! ```

pub mod consultants;
pub mod error;
pub mod extract;
pub mod referral_codes;

use std::sync::Arc;

use axum::{Router, routing::get};
use indica_core::store::ProfileStore;

pub use error::ApiError;

/// State shared by all API handlers.
pub struct ApiState<S> {
  pub store:             Arc<S>,
  /// Base URL that referral links are built under.
  pub referral_base_url: Arc<str>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:             Arc::clone(&self.store),
      referral_base_url: Arc::clone(&self.referral_base_url),
    }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, referral_base_url: impl Into<Arc<str>>) -> Router<()>
where
  S: ProfileStore + 'static,
{
  let state = ApiState {
    store,
    referral_base_url: referral_base_url.into(),
  };

  Router::new()
    // Consultants
    .route("/consultants/{id}", get(consultants::get_one::<S>))
    .route("/consultants/{id}/referrals", get(consultants::referrals::<S>))
    .route("/consultants/{id}/summary", get(consultants::summary::<S>))
    .route("/consultants/{id}/dashboard", get(consultants::dashboard::<S>))
    // Referral links
    .route("/referral-codes/{code}", get(referral_codes::lookup::<S>))
    .with_state(state)
}
