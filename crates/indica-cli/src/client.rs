//! Async HTTP client wrapping the Indica JSON API.

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use indica_core::{dashboard::Dashboard, profile::ConsultantProfile};
use reqwest::Client;
use std::time::Duration;
use uuid::Uuid;

/// Connection settings for the Indica API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Async HTTP client for the Indica JSON REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  /// `GET /api/consultants/<id>/dashboard?now=<local time>`
  ///
  /// Sends the local clock so "this month" is counted in the viewer's time
  /// zone.
  pub async fn dashboard(&self, consultant_id: Uuid) -> Result<Dashboard> {
    let path = format!("/consultants/{consultant_id}/dashboard");
    let resp = self
      .auth(self.client.get(self.url(&path)))
      .query(&[("now", Local::now().to_rfc3339())])
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET {path} → {}", resp.status()));
    }
    resp.json().await.context("deserialising dashboard")
  }

  /// `GET /api/referral-codes/<code>`
  pub async fn consultant_by_code(&self, code: &str) -> Result<ConsultantProfile> {
    let resp = self
      .auth(self.client.get(self.url(&format!("/referral-codes/{code}"))))
      .send()
      .await
      .context("GET /referral-codes failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /referral-codes/{code} → {}", resp.status()));
    }
    resp.json().await.context("deserialising consultant")
  }
}
