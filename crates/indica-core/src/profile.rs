//! Profile types: the rows read from the external profile store.
//!
//! Profiles are owned and mutated by the store; this crate only ever reads
//! snapshots of them.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{
  Deserialize, Deserializer, Serialize, Serializer,
  de::{
    IntoDeserializer,
    value::{Error as ValueError, StrDeserializer},
  },
};
use strum::EnumString;
use uuid::Uuid;

/// Monetary amount in Brazilian Real.
pub type Money = f64;

// ─── Contract status ─────────────────────────────────────────────────────────

/// Lifecycle state of a referred person's contract.
///
/// The store writes Portuguese values (`ativo`, `inativo`, `cancelado`); the
/// English names are accepted too. Matching is exact: anything else,
/// including other capitalizations, is kept verbatim in
/// [`ContractStatus::Unrecognized`] so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
pub enum ContractStatus {
  #[strum(serialize = "active", serialize = "ativo")]
  Active,
  #[strum(serialize = "inactive", serialize = "inativo")]
  Inactive,
  #[strum(
    serialize = "cancelled",
    serialize = "canceled",
    serialize = "cancelado"
  )]
  Cancelled,
  #[strum(default)]
  Unrecognized(String),
}

impl ContractStatus {
  /// Parse a raw store value. Never fails.
  pub fn parse(raw: &str) -> Self {
    Self::from_str(raw)
      .unwrap_or_else(|_| Self::Unrecognized(raw.to_owned()))
  }

  /// Canonical name for known statuses, the raw value otherwise.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Active => "active",
      Self::Inactive => "inactive",
      Self::Cancelled => "cancelled",
      Self::Unrecognized(raw) => raw,
    }
  }

  pub fn is_active(&self) -> bool { matches!(self, Self::Active) }
}

impl fmt::Display for ContractStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for ContractStatus {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for ContractStatus {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(Self::parse(raw.as_deref().unwrap_or_default()))
  }
}

// ─── Role ────────────────────────────────────────────────────────────────────

/// The role stored on a profile. Only consultants own a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
  #[serde(rename = "consultor", alias = "consultant")]
  Consultant,
  #[serde(rename = "cliente", alias = "client")]
  Client,
  #[serde(other)]
  Other,
}

impl Role {
  /// Parse a raw store value using the serde names above. Never fails.
  pub fn parse(raw: &str) -> Self {
    let de: StrDeserializer<'_, ValueError> = raw.into_deserializer();
    Self::deserialize(de).unwrap_or(Self::Other)
  }
}

// ─── Profiles ────────────────────────────────────────────────────────────────

/// Placeholder shown when a referred profile has no name.
pub const NAME_FALLBACK: &str = "name not provided";

/// One person referred by a consultant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferredProfile {
  pub id:              Uuid,
  #[serde(default, alias = "full_name")]
  pub name:            Option<String>,
  #[serde(default)]
  pub phone:           Option<String>,
  /// A null balance in the store reads as zero.
  #[serde(default, deserialize_with = "null_as_zero")]
  pub current_balance: Money,
  pub contract_status: ContractStatus,
  pub created_at:      DateTime<Utc>,
  pub referred_by:     Uuid,
}

impl ReferredProfile {
  /// The name to render, or [`NAME_FALLBACK`] when blank or absent.
  pub fn display_name(&self) -> &str {
    self
      .name
      .as_deref()
      .map(str::trim)
      .filter(|n| !n.is_empty())
      .unwrap_or(NAME_FALLBACK)
  }
}

/// Order `profiles` the way the referral table lists them: by
/// [`ReferredProfile::display_name`], so unnamed profiles sort under the
/// placeholder.
pub fn sort_by_display_name(profiles: &mut [ReferredProfile]) {
  profiles.sort_by(|a, b| a.display_name().cmp(b.display_name()));
}

/// The authenticated owner of a referral code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultantProfile {
  pub id:            Uuid,
  pub role:          Role,
  #[serde(default, alias = "full_name")]
  pub name:          Option<String>,
  pub referral_code: String,
}

impl ConsultantProfile {
  pub fn is_consultant(&self) -> bool { self.role == Role::Consultant }
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
  Ok(Option::<Money>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_accepts_portuguese_and_english() {
    assert_eq!(ContractStatus::parse("ativo"), ContractStatus::Active);
    assert_eq!(ContractStatus::parse("active"), ContractStatus::Active);
    assert_eq!(ContractStatus::parse("inativo"), ContractStatus::Inactive);
    assert_eq!(ContractStatus::parse("cancelado"), ContractStatus::Cancelled);
    assert_eq!(ContractStatus::parse("canceled"), ContractStatus::Cancelled);
  }

  #[test]
  fn status_matching_is_case_sensitive() {
    for raw in ["ATIVO", "Ativo", "ACTIVE"] {
      let status = ContractStatus::parse(raw);
      assert_eq!(status, ContractStatus::Unrecognized(raw.into()));
      assert_eq!(status.to_string(), raw);
      assert_eq!(crate::earnings::compute_earning(1000.0, &status), 0.0);
    }
  }

  #[test]
  fn unknown_status_is_kept_verbatim() {
    let status = ContractStatus::parse("pending_review");
    assert_eq!(
      status,
      ContractStatus::Unrecognized("pending_review".into())
    );
    assert_eq!(status.to_string(), "pending_review");
    assert_eq!(
      serde_json::to_value(&status).unwrap(),
      serde_json::json!("pending_review")
    );
  }

  #[test]
  fn profile_from_store_row_with_nulls() {
    let row = serde_json::json!({
      "id": "6f1c1a52-3a55-4b8f-9a1e-5f0f9d1d2b10",
      "full_name": null,
      "current_balance": null,
      "contract_status": "ativo",
      "created_at": "2025-03-04T10:00:00Z",
      "referred_by": "0b6d0c0e-7a4c-4a55-8d1b-2f3e4a5b6c7d",
    });
    let profile: ReferredProfile = serde_json::from_value(row).unwrap();
    assert_eq!(profile.current_balance, 0.0);
    assert_eq!(profile.contract_status, ContractStatus::Active);
    assert_eq!(profile.display_name(), NAME_FALLBACK);
    assert!(profile.phone.is_none());
  }

  #[test]
  fn blank_name_falls_back() {
    let row = serde_json::json!({
      "id": "6f1c1a52-3a55-4b8f-9a1e-5f0f9d1d2b10",
      "name": "   ",
      "contract_status": null,
      "created_at": "2025-03-04T10:00:00Z",
      "referred_by": "0b6d0c0e-7a4c-4a55-8d1b-2f3e4a5b6c7d",
    });
    let profile: ReferredProfile = serde_json::from_value(row).unwrap();
    assert_eq!(profile.display_name(), NAME_FALLBACK);
    assert_eq!(profile.contract_status, ContractStatus::Unrecognized(String::new()));
  }

  #[test]
  fn role_parses_store_values() {
    let role: Role = serde_json::from_str("\"consultor\"").unwrap();
    assert_eq!(role, Role::Consultant);
    let role: Role = serde_json::from_str("\"admin\"").unwrap();
    assert_eq!(role, Role::Other);
  }

  #[test]
  fn role_parse_agrees_with_serde_names() {
    assert_eq!(Role::parse("consultor"), Role::Consultant);
    assert_eq!(Role::parse("consultant"), Role::Consultant);
    assert_eq!(Role::parse("cliente"), Role::Client);
    assert_eq!(Role::parse("client"), Role::Client);
    assert_eq!(Role::parse("admin"), Role::Other);
    assert_eq!(Role::parse(""), Role::Other);
  }
}
