//! Recurring earnings owed to a consultant for one referred person.

use crate::profile::{ContractStatus, Money};

/// Share of an active referral's balance paid to the referrer.
pub const RECURRING_RATE: f64 = 0.01;

/// The recurring earning for a referred person with `balance` and `status`.
///
/// Only an active contract with a strictly positive balance earns; every
/// other combination, including unrecognized statuses and non-finite
/// balances, yields zero.
pub fn compute_earning(balance: Money, status: &ContractStatus) -> Money {
  if status.is_active() && balance > 0.0 && balance.is_finite() {
    balance * RECURRING_RATE
  } else {
    0.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn all_statuses() -> Vec<ContractStatus> {
    vec![
      ContractStatus::Active,
      ContractStatus::Inactive,
      ContractStatus::Cancelled,
      ContractStatus::Unrecognized("pending_review".into()),
    ]
  }

  #[test]
  fn non_positive_balance_never_earns() {
    for status in all_statuses() {
      for balance in [0.0, -0.01, -250.0, f64::MIN] {
        assert_eq!(compute_earning(balance, &status), 0.0, "{status} / {balance}");
      }
    }
  }

  #[test]
  fn active_earns_one_percent() {
    for balance in [0.5, 1000.0, 200.555, 1e9] {
      assert_eq!(compute_earning(balance, &ContractStatus::Active), balance * 0.01);
    }
  }

  #[test]
  fn inactive_and_cancelled_never_earn() {
    assert_eq!(compute_earning(1000.0, &ContractStatus::Inactive), 0.0);
    assert_eq!(compute_earning(1000.0, &ContractStatus::Cancelled), 0.0);
  }

  #[test]
  fn unrecognized_status_never_earns() {
    let status = ContractStatus::parse("pending_review");
    assert_eq!(compute_earning(5000.0, &status), 0.0);
    assert_eq!(status.as_str(), "pending_review");
  }

  #[test]
  fn non_finite_balance_never_earns() {
    assert_eq!(compute_earning(f64::NAN, &ContractStatus::Active), 0.0);
    assert_eq!(compute_earning(f64::INFINITY, &ContractStatus::Active), 0.0);
  }

  #[test]
  fn fractional_balance_keeps_full_precision() {
    let earning = compute_earning(200.555, &ContractStatus::Active);
    assert!((earning - 2.00555).abs() < 1e-12);
  }
}
