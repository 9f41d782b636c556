//! HTTP server for the Indica referral dashboard.
//!
//! Nests the [`indica_api`] router under `/api` behind an HTTP Basic gate and
//! request tracing. Backed by any [`ProfileStore`].

pub mod auth;
pub mod error;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware, routing::get};
use indica_core::store::ProfileStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, require_auth};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `INDICA_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  /// Base URL referral links are built under (`<base>/r/<code>`).
  pub referral_base_url:  String,
  pub store_path:         PathBuf,
  pub auth_username:      String,
  pub auth_password_hash: String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state the router is assembled from.
#[derive(Clone)]
pub struct AppState<S: ProfileStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
  pub auth:   Arc<AuthConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application [`Router`].
///
/// `/health` is open; everything under `/api` requires credentials.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ProfileStore + 'static,
{
  let api = indica_api::api_router(state.store.clone(), state.config.referral_base_url.as_str())
    .layer(middleware::from_fn_with_state(state.auth.clone(), require_auth));

  Router::new()
    .route("/health", get(|| async { "ok" }))
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use indica_store_sqlite::{ProfileRecord, SqliteStore};
  use rand_core::OsRng;
  use tower::ServiceExt as _;

  async fn make_state(password: &str) -> (AppState<SqliteStore>, ProfileRecord) {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let owner = ProfileRecord::consultant("Carla", "CARLA01");
    store
      .import(vec![
        owner.clone(),
        ProfileRecord::referral(owner.id, Some("Amanda"), Some(1000.0), "ativo"),
      ])
      .await
      .unwrap();

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string();

    let state = AppState {
      store:  Arc::new(store),
      config: Arc::new(ServerConfig {
        host:               "127.0.0.1".to_string(),
        port:               8080,
        referral_base_url:  "https://indica.test".to_string(),
        store_path:         PathBuf::from(":memory:"),
        auth_username:      "dashboard".to_string(),
        auth_password_hash: hash.clone(),
      }),
      auth:   Arc::new(AuthConfig {
        username:      "dashboard".to_string(),
        password_hash: hash,
      }),
    };
    (state, owner)
  }

  fn auth_header(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  async fn oneshot(
    state: AppState<SqliteStore>,
    uri: &str,
    auth: Option<&str>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = auth {
      builder = builder.header(header::AUTHORIZATION, value);
    }
    let req = builder.body(Body::empty()).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  #[tokio::test]
  async fn health_needs_no_credentials() {
    let (state, _) = make_state("secret").await;
    let resp = oneshot(state, "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn unauthenticated_requests_return_401() {
    let (state, owner) = make_state("secret").await;
    let resp = oneshot(state, &format!("/api/consultants/{}/dashboard", owner.id), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn wrong_password_returns_401() {
    let (state, owner) = make_state("secret").await;
    let auth = auth_header("dashboard", "nope");
    let resp = oneshot(
      state,
      &format!("/api/consultants/{}/dashboard", owner.id),
      Some(&auth),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn authenticated_dashboard_request() {
    let (state, owner) = make_state("secret").await;
    let auth = auth_header("dashboard", "secret");
    let resp = oneshot(
      state,
      &format!("/api/consultants/{}/dashboard", owner.id),
      Some(&auth),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["referral_link"], "https://indica.test/r/CARLA01");
    assert_eq!(body["summary"]["total_referrals"], 1);
  }
}
