//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, UUIDs hyphenated lowercase strings.
//! Roles and contract statuses are kept as the raw values the remote store
//! uses, and are only interpreted on the way out.

use chrono::{DateTime, Utc};
use indica_core::profile::{ConsultantProfile, ContractStatus, ReferredProfile, Role};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read from a `profiles` row for the consultant view.
pub struct RawConsultant {
  pub id:            String,
  pub role:          String,
  pub name:          Option<String>,
  pub referral_code: Option<String>,
}

impl RawConsultant {
  pub const COLUMNS: &'static str = "id, role, name, referral_code";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      role:          row.get(1)?,
      name:          row.get(2)?,
      referral_code: row.get(3)?,
    })
  }

  pub fn into_consultant(self) -> Result<ConsultantProfile> {
    Ok(ConsultantProfile {
      id:            decode_uuid(&self.id)?,
      role:          Role::parse(&self.role),
      name:          self.name,
      referral_code: self.referral_code.unwrap_or_default(),
    })
  }
}

/// Raw values read from a `profiles` row for the referral table.
pub struct RawReferredProfile {
  pub id:              String,
  pub name:            Option<String>,
  pub phone:           Option<String>,
  pub current_balance: Option<f64>,
  pub contract_status: Option<String>,
  pub created_at:      String,
  pub referred_by:     String,
}

impl RawReferredProfile {
  pub const COLUMNS: &'static str =
    "id, name, phone, current_balance, contract_status, created_at, referred_by";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      name:            row.get(1)?,
      phone:           row.get(2)?,
      current_balance: row.get(3)?,
      contract_status: row.get(4)?,
      created_at:      row.get(5)?,
      referred_by:     row.get(6)?,
    })
  }

  pub fn into_profile(self) -> Result<ReferredProfile> {
    Ok(ReferredProfile {
      id:              decode_uuid(&self.id)?,
      name:            self.name,
      phone:           self.phone,
      current_balance: self.current_balance.unwrap_or(0.0),
      contract_status: ContractStatus::parse(self.contract_status.as_deref().unwrap_or_default()),
      created_at:      decode_dt(&self.created_at)?,
      referred_by:     decode_uuid(&self.referred_by)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn consultant_row_decodes_role() {
    let raw = |role: &str| RawConsultant {
      id:            encode_uuid(Uuid::new_v4()),
      role:          role.to_owned(),
      name:          Some("Carla".into()),
      referral_code: None,
    };
    let consultant = raw("consultor").into_consultant().unwrap();
    assert_eq!(consultant.role, Role::Consultant);
    assert_eq!(consultant.referral_code, "");
    assert_eq!(raw("admin").into_consultant().unwrap().role, Role::Other);
  }

  #[test]
  fn null_columns_fall_back() {
    let raw = RawReferredProfile {
      id:              encode_uuid(Uuid::new_v4()),
      name:            None,
      phone:           None,
      current_balance: None,
      contract_status: None,
      created_at:      encode_dt(Utc::now()),
      referred_by:     encode_uuid(Uuid::new_v4()),
    };
    let profile = raw.into_profile().unwrap();
    assert_eq!(profile.current_balance, 0.0);
    assert_eq!(profile.contract_status, ContractStatus::Unrecognized(String::new()));
  }

  #[test]
  fn bad_timestamp_is_an_error() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
