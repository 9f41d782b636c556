//! Handler for `GET /referral-codes/:code`.
//!
//! Resolves the code embedded in a referral link back to the consultant who
//! owns it. Codes held by non-consultant profiles are reported as not found.

use axum::{Json, extract::State};
use indica_core::{profile::ConsultantProfile, store::ProfileStore};

use crate::{ApiState, error::ApiError, extract::Path};

/// `GET /referral-codes/:code`
pub async fn lookup<S>(
  State(state): State<ApiState<S>>,
  Path(code): Path<String>,
) -> Result<Json<ConsultantProfile>, ApiError>
where
  S: ProfileStore,
{
  let consultant = state
    .store
    .find_by_referral_code(&code)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .filter(ConsultantProfile::is_consultant)
    .ok_or_else(|| ApiError::NotFound(format!("referral code {code:?} not found")))?;
  Ok(Json(consultant))
}
