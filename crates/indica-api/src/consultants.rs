//! Handlers for `/consultants` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/consultants/:id` | 404 if unknown, 403 if not a consultant |
//! | `GET`  | `/consultants/:id/referrals` | Rows with per-row earnings, ordered by display name |
//! | `GET`  | `/consultants/:id/summary` | Optional `?now=<rfc3339>` |
//! | `GET`  | `/consultants/:id/dashboard` | Optional `?now=<rfc3339>` |
//!
//! The offset in `now` selects the time zone "this month" is counted in.

use axum::{Json, extract::State};
use chrono::{DateTime, FixedOffset, Utc};
use indica_core::{
  dashboard::{Dashboard, ReferralRow, load_consultant, load_dashboard},
  profile::{ConsultantProfile, sort_by_display_name},
  store::ProfileStore,
  summary::{ReferralSummary, compute_summary},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  ApiState,
  error::ApiError,
  extract::{Path, Query},
};

/// Query parameters shared by endpoints that evaluate "this month".
#[derive(Debug, Deserialize, Default)]
pub struct NowParams {
  /// Evaluation time for month-based figures, offset preserved. Defaults to
  /// the server clock in UTC.
  pub now: Option<DateTime<FixedOffset>>,
}

impl NowParams {
  fn resolve(&self) -> DateTime<FixedOffset> {
    self.now.unwrap_or_else(|| Utc::now().fixed_offset())
  }
}

// ─── Profile ──────────────────────────────────────────────────────────────────

/// `GET /consultants/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ConsultantProfile>, ApiError>
where
  S: ProfileStore,
{
  Ok(Json(load_consultant(state.store.as_ref(), id).await?))
}

// ─── Referrals ────────────────────────────────────────────────────────────────

/// `GET /consultants/:id/referrals`
pub async fn referrals<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReferralRow>>, ApiError>
where
  S: ProfileStore,
{
  load_consultant(state.store.as_ref(), id).await?;
  let mut referrals = state
    .store
    .list_referrals(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  sort_by_display_name(&mut referrals);
  Ok(Json(referrals.iter().map(ReferralRow::from_profile).collect()))
}

// ─── Summary ──────────────────────────────────────────────────────────────────

/// `GET /consultants/:id/summary[?now=...]`
pub async fn summary<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<NowParams>,
) -> Result<Json<ReferralSummary>, ApiError>
where
  S: ProfileStore,
{
  load_consultant(state.store.as_ref(), id).await?;
  let referrals = state
    .store
    .list_referrals(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(compute_summary(&referrals, &params.resolve())))
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

/// `GET /consultants/:id/dashboard[?now=...]`
pub async fn dashboard<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<NowParams>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: ProfileStore,
{
  let now = params.resolve();
  let dashboard =
    load_dashboard(state.store.as_ref(), id, &state.referral_base_url, &now).await?;
  tracing::debug!(
    consultant = %id,
    referrals = dashboard.summary.total_referrals,
    "dashboard assembled"
  );
  Ok(Json(dashboard))
}
