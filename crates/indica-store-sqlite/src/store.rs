//! [`SqliteStore`]: the SQLite implementation of [`ProfileStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use indica_core::{
  profile::{ConsultantProfile, ReferredProfile, sort_by_display_name},
  store::ProfileStore,
};

use crate::{
  Error, Result,
  encode::{RawConsultant, RawReferredProfile, encode_dt, encode_uuid},
  record::ProfileRecord,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Indica profile store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn profile_exists(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM profiles WHERE id = ?1",
              rusqlite::params![id_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  /// Insert a single profile row.
  ///
  /// Fails with [`Error::ReferrerNotFound`] if `referred_by` names a profile
  /// that is not in the store.
  pub async fn insert_profile(&self, record: &ProfileRecord) -> Result<()> {
    if let Some(referrer) = record.referred_by
      && !self.profile_exists(referrer).await?
    {
      return Err(Error::ReferrerNotFound(referrer));
    }

    let params = InsertParams::from(record);
    self
      .conn
      .call(move |conn| {
        params.execute(conn)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert many profile rows in one transaction.
  ///
  /// Foreign keys are checked at commit, so consultants and the people they
  /// referred may appear in any order. Returns the number of rows written.
  pub async fn import(&self, records: Vec<ProfileRecord>) -> Result<usize> {
    let params: Vec<InsertParams> = records.iter().map(InsertParams::from).collect();
    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute_batch("PRAGMA defer_foreign_keys = ON;")?;
        for p in &params {
          p.execute(&tx)?;
        }
        tx.commit()?;
        Ok(params.len())
      })
      .await?;
    Ok(written)
  }
}

/// Owned column values for one `INSERT INTO profiles`.
struct InsertParams {
  id:              String,
  role:            String,
  name:            Option<String>,
  phone:           Option<String>,
  referral_code:   Option<String>,
  referred_by:     Option<String>,
  current_balance: Option<f64>,
  contract_status: Option<String>,
  created_at:      String,
}

impl From<&ProfileRecord> for InsertParams {
  fn from(r: &ProfileRecord) -> Self {
    Self {
      id:              encode_uuid(r.id),
      role:            r.role.clone(),
      name:            r.name.clone(),
      phone:           r.phone.clone(),
      referral_code:   r.referral_code.clone(),
      referred_by:     r.referred_by.map(encode_uuid),
      current_balance: r.current_balance,
      contract_status: r.contract_status.clone(),
      created_at:      encode_dt(r.created_at),
    }
  }
}

impl InsertParams {
  fn execute(&self, conn: &rusqlite::Connection) -> rusqlite::Result<usize> {
    conn.execute(
      "INSERT INTO profiles (
         id, role, name, phone, referral_code, referred_by,
         current_balance, contract_status, created_at
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
      rusqlite::params![
        self.id,
        self.role,
        self.name,
        self.phone,
        self.referral_code,
        self.referred_by,
        self.current_balance,
        self.contract_status,
        self.created_at,
      ],
    )
  }
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = Error;

  async fn get_consultant(&self, id: Uuid) -> Result<Option<ConsultantProfile>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawConsultant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM profiles WHERE id = ?1", RawConsultant::COLUMNS),
              rusqlite::params![id_str],
              RawConsultant::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawConsultant::into_consultant).transpose()
  }

  async fn find_by_referral_code(&self, referral_code: &str) -> Result<Option<ConsultantProfile>> {
    let code = referral_code.to_owned();

    let raw: Option<RawConsultant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM profiles WHERE referral_code = ?1",
                RawConsultant::COLUMNS
              ),
              rusqlite::params![code],
              RawConsultant::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawConsultant::into_consultant).transpose()
  }

  async fn list_referrals(&self, consultant_id: Uuid) -> Result<Vec<ReferredProfile>> {
    let id_str = encode_uuid(consultant_id);

    let raws: Vec<RawReferredProfile> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM profiles WHERE referred_by = ?1",
          RawReferredProfile::COLUMNS
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], RawReferredProfile::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut profiles = raws
      .into_iter()
      .map(RawReferredProfile::into_profile)
      .collect::<Result<Vec<_>>>()?;
    sort_by_display_name(&mut profiles);
    Ok(profiles)
  }
}
