//! The dashboard read model: never stored, always derived.
//!
//! Row earnings and the summary total both come from
//! [`compute_earning`](crate::earnings::compute_earning) over the same
//! snapshot, so the table and the stat cards cannot disagree.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  earnings::compute_earning,
  link::referral_link,
  profile::{ConsultantProfile, ContractStatus, Money, ReferredProfile, sort_by_display_name},
  store::ProfileStore,
  summary::{ReferralSummary, compute_summary},
};

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One line of the referral table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferralRow {
  pub id:              Uuid,
  /// Name with the placeholder already applied.
  pub display_name:    String,
  pub phone:           Option<String>,
  pub current_balance: Money,
  pub contract_status: ContractStatus,
  pub earning:         Money,
  pub created_at:      DateTime<Utc>,
}

impl ReferralRow {
  pub fn from_profile(profile: &ReferredProfile) -> Self {
    Self {
      id:              profile.id,
      display_name:    profile.display_name().to_owned(),
      phone:           profile.phone.clone(),
      current_balance: profile.current_balance,
      contract_status: profile.contract_status.clone(),
      earning:         compute_earning(profile.current_balance, &profile.contract_status),
      created_at:      profile.created_at,
    }
  }
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Everything the dashboard view renders for one consultant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
  pub consultant:    ConsultantProfile,
  pub referral_link: String,
  pub summary:       ReferralSummary,
  pub referrals:     Vec<ReferralRow>,
  /// The "now" the summary was evaluated at.
  pub as_of:         DateTime<Utc>,
}

impl Dashboard {
  /// Assemble a dashboard from one referral snapshot.
  ///
  /// Rows are ordered by display name. The summary is computed over the rows
  /// in that same order so the floating-point total matches the row sum
  /// exactly.
  pub fn build<Tz: TimeZone>(
    consultant: ConsultantProfile,
    referral_base_url: &str,
    referrals: &[ReferredProfile],
    now: &DateTime<Tz>,
  ) -> Self {
    let mut ordered = referrals.to_vec();
    sort_by_display_name(&mut ordered);
    let rows = ordered.iter().map(ReferralRow::from_profile).collect();

    Self {
      referral_link: referral_link(referral_base_url, &consultant.referral_code),
      summary: compute_summary(&ordered, now),
      referrals: rows,
      as_of: now.with_timezone(&Utc),
      consultant,
    }
  }
}

/// Fetch and assemble the dashboard for `consultant_id`.
///
/// Fails with [`Error::ConsultantNotFound`] for unknown ids and
/// [`Error::NotConsultant`] for profiles without the consultant role. The
/// referral list is fetched exactly once.
pub async fn load_dashboard<S, Tz>(
  store: &S,
  consultant_id: Uuid,
  referral_base_url: &str,
  now: &DateTime<Tz>,
) -> Result<Dashboard>
where
  S: ProfileStore,
  Tz: TimeZone,
{
  let consultant = load_consultant(store, consultant_id).await?;
  let referrals = store
    .list_referrals(consultant_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Dashboard::build(consultant, referral_base_url, &referrals, now))
}

/// Fetch `consultant_id` and check that it may own a dashboard.
pub async fn load_consultant<S: ProfileStore>(
  store: &S,
  consultant_id: Uuid,
) -> Result<ConsultantProfile> {
  let consultant = store
    .get_consultant(consultant_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or(Error::ConsultantNotFound(consultant_id))?;
  if !consultant.is_consultant() {
    return Err(Error::NotConsultant(consultant_id));
  }
  Ok(consultant)
}
