//! [`ProfileRecord`]: a full `profiles` row as written into the store.

use chrono::{DateTime, Utc};
use indica_core::profile::Money;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One `profiles` row, consultant or referred person alike.
///
/// Role and contract status are kept as raw strings so that whatever the
/// upstream store holds survives a round trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
  pub id:              Uuid,
  pub role:            String,
  #[serde(default, alias = "full_name")]
  pub name:            Option<String>,
  #[serde(default)]
  pub phone:           Option<String>,
  #[serde(default)]
  pub referral_code:   Option<String>,
  #[serde(default)]
  pub referred_by:     Option<Uuid>,
  #[serde(default)]
  pub current_balance: Option<Money>,
  #[serde(default)]
  pub contract_status: Option<String>,
  #[serde(default = "Utc::now")]
  pub created_at:      DateTime<Utc>,
}

impl ProfileRecord {
  /// A consultant row owning `referral_code`.
  pub fn consultant(name: impl Into<String>, referral_code: impl Into<String>) -> Self {
    Self {
      id:              Uuid::new_v4(),
      role:            "consultor".into(),
      name:            Some(name.into()),
      phone:           None,
      referral_code:   Some(referral_code.into()),
      referred_by:     None,
      current_balance: None,
      contract_status: None,
      created_at:      Utc::now(),
    }
  }

  /// A client row referred by `referred_by`.
  pub fn referral(
    referred_by: Uuid,
    name: Option<&str>,
    current_balance: Option<Money>,
    contract_status: &str,
  ) -> Self {
    Self {
      id:              Uuid::new_v4(),
      role:            "cliente".into(),
      name:            name.map(str::to_owned),
      phone:           None,
      referral_code:   None,
      referred_by:     Some(referred_by),
      current_balance,
      contract_status: Some(contract_status.to_owned()),
      created_at:      Utc::now(),
    }
  }
}
