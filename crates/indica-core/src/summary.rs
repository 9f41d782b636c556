//! Referral statistics for one consultant's dashboard.
//!
//! A [`ReferralSummary`] is a pure function of a referral snapshot and the
//! evaluation-time "now". It is never stored; every fetch recomputes it.

use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};

use crate::{
  earnings::compute_earning,
  profile::{Money, ReferredProfile},
};

/// Link clicks assumed per referral. There is no click tracking behind this.
pub const SIMULATED_CLICKS_PER_REFERRAL: usize = 3;

/// Aggregated figures shown on the dashboard stat cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferralSummary {
  pub total_referrals:      usize,
  pub active_contracts:     usize,
  pub total_earnings:       Money,
  /// Referrals created in the calendar month and year of `now`.
  pub this_month_referrals: usize,
  /// `active_contracts / total_referrals` as a percentage; zero when there are
  /// no referrals.
  pub conversion_rate:      f64,
  /// Simulated engagement figure, see [`simulated_clicks`]. Not telemetry.
  pub total_clicks:         usize,
}

/// Placeholder engagement metric: a fixed number of clicks per referral.
pub fn simulated_clicks(total_referrals: usize) -> usize {
  total_referrals * SIMULATED_CLICKS_PER_REFERRAL
}

/// Compute the summary for `referrals` as seen at `now`.
///
/// Month matching happens in `now`'s time zone, so a dashboard evaluated in
/// `America/Sao_Paulo` counts a referral created at 01:00 UTC on the 1st as
/// belonging to the previous month.
pub fn compute_summary<Tz: TimeZone>(
  referrals: &[ReferredProfile],
  now: &DateTime<Tz>,
) -> ReferralSummary {
  let total_referrals = referrals.len();
  let active_contracts = referrals
    .iter()
    .filter(|r| r.contract_status.is_active())
    .count();
  let total_earnings = referrals
    .iter()
    .map(|r| compute_earning(r.current_balance, &r.contract_status))
    .sum();

  let tz = now.timezone();
  let this_month_referrals = referrals
    .iter()
    .filter(|r| {
      let created = r.created_at.with_timezone(&tz);
      created.month() == now.month() && created.year() == now.year()
    })
    .count();

  let conversion_rate = if total_referrals == 0 {
    0.0
  } else {
    active_contracts as f64 / total_referrals as f64 * 100.0
  };

  ReferralSummary {
    total_referrals,
    active_contracts,
    total_earnings,
    this_month_referrals,
    conversion_rate,
    total_clicks: simulated_clicks(total_referrals),
  }
}
